//! Background worker thread — the preview fetch runs here.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Each run
//! command carries everything the fetch needs (address, start date,
//! percentage) plus a generation stamp; the main thread drops any response
//! whose generation is no longer current.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;

use spreadlab_core::{PreviewResult, SimulationContext, SpreadPercentage};

use crate::preview_service::PreviewService;

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    RunPreview {
        address: String,
        start_date: NaiveDate,
        percentage: SpreadPercentage,
        generation: u64,
        product: String,
    },
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    PreviewReady {
        generation: u64,
        product: String,
        result: Box<PreviewResult>,
    },
    PreviewFailed {
        generation: u64,
        error: String,
    },
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    service: Arc<dyn PreviewService>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::Builder::new()
        .name("spreadlab-worker".into())
        .spawn(move || {
            worker_loop(service, rx, tx, cancel);
        })
        .expect("failed to spawn worker thread")
}

fn worker_loop(
    service: Arc<dyn PreviewService>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
    cancel: Arc<AtomicBool>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::RunPreview {
                address,
                start_date,
                percentage,
                generation,
                product,
            }) => {
                handle_preview(
                    service.as_ref(),
                    address,
                    start_date,
                    percentage,
                    generation,
                    product,
                    &tx,
                    &cancel,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_preview(
    service: &dyn PreviewService,
    address: String,
    start_date: NaiveDate,
    percentage: SpreadPercentage,
    generation: u64,
    product: String,
    tx: &Sender<WorkerResponse>,
    cancel: &Arc<AtomicBool>,
) {
    let ctx = SimulationContext::new(address, start_date);
    let outcome = service.fetch_preview(&ctx, percentage);

    // A cancelled fetch still completes, but its result must not land.
    if cancel.load(Ordering::Relaxed) {
        return;
    }

    match outcome {
        Ok(result) => {
            let _ = tx.send(WorkerResponse::PreviewReady {
                generation,
                product,
                result: Box::new(result),
            });
        }
        Err(e) => {
            let _ = tx.send(WorkerResponse::PreviewFailed {
                generation,
                error: e.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview_service::tests::{FailingService, StaticService};
    use spreadlab_core::{AssetsBreakdown, Kpis};
    use std::sync::mpsc;

    fn sample_result() -> PreviewResult {
        PreviewResult {
            kpis: Kpis::default(),
            assets: AssetsBreakdown::default(),
            data: [("2022-01-01".to_string(), 1.0)].into_iter().collect(),
        }
    }

    fn run_command() -> WorkerCommand {
        WorkerCommand::RunPreview {
            address: "0xabc".into(),
            start_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            percentage: SpreadPercentage::default(),
            generation: 7,
            product: "Stable Anchor".into(),
        }
    }

    #[test]
    fn worker_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, _resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let service = Arc::new(StaticService::new(sample_result()));

        let handle = spawn_worker(service, cmd_rx, resp_tx, cancel);
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().expect("worker should join cleanly");
    }

    #[test]
    fn run_preview_sends_ready_with_same_generation() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let service = Arc::new(StaticService::new(sample_result()));

        let handle = spawn_worker(service.clone(), cmd_rx, resp_tx, cancel);
        cmd_tx.send(run_command()).unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::PreviewReady {
                generation,
                product,
                result,
            } => {
                assert_eq!(generation, 7);
                assert_eq!(product, "Stable Anchor");
                assert_eq!(result.data.len(), 1);
            }
            other => panic!("expected PreviewReady, got {other:?}"),
        }

        // The service saw the context the command carried, not ambient state.
        let seen = service.last_request();
        let (ctx, pct) = seen.expect("service should have been called");
        assert_eq!(ctx.address, "0xabc");
        assert_eq!(ctx.start_date_iso(), "2022-01-01");
        assert_eq!(pct.value(), 20);

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn failed_fetch_reports_status_text() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let service = Arc::new(FailingService::not_found());

        let handle = spawn_worker(service, cmd_rx, resp_tx, cancel);
        cmd_tx.send(run_command()).unwrap();

        match resp_rx.recv().unwrap() {
            WorkerResponse::PreviewFailed { generation, error } => {
                assert_eq!(generation, 7);
                assert!(error.contains("Not Found"));
            }
            other => panic!("expected PreviewFailed, got {other:?}"),
        }

        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn cancelled_fetch_sends_nothing() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(true));
        let service = Arc::new(StaticService::new(sample_result()));

        let handle = spawn_worker(service, cmd_rx, resp_tx, cancel);
        cmd_tx.send(run_command()).unwrap();
        cmd_tx.send(WorkerCommand::Shutdown).unwrap();
        handle.join().unwrap();

        assert!(resp_rx.try_recv().is_err());
    }
}
