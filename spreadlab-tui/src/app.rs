//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The worker thread communicates via channels;
//! preview responses are stamped with a generation and anything stale on
//! arrival is dropped, so the displayed preview always matches the newest
//! launch rather than the last request to resolve.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use chrono::NaiveDateTime;

use spreadlab_core::{ProductDescription, SimulationContext, SpreadPercentage};

use crate::preview::PreviewState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Backtest,
    Input,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Backtest => "FETCH",
            ErrorCategory::Input => "INPUT",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Welcome,
    ErrorHistory,
}

/// Per-card state: the text buffer behind the percentage field.
///
/// The buffer persists across collapse/expand; nothing resets it
/// automatically.
#[derive(Debug, Clone)]
pub struct CardState {
    pub param_input: String,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            param_input: SpreadPercentage::default().to_string(),
        }
    }
}

/// Top-level application state.
pub struct AppState {
    // Cards
    pub products: Vec<ProductDescription>,
    pub cards: Vec<CardState>,
    pub cursor: usize,
    /// Which card (if any) is expanded. At most one.
    pub opened: Option<usize>,

    // Fetch context and result
    pub context: SimulationContext,
    pub preview: PreviewState,
    /// Stamp of the newest launch; responses carrying anything else are stale.
    pub generation: u64,
    pub in_flight: bool,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    pub cancel: Arc<AtomicBool>,

    // Cross-cutting
    pub running: bool,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        products: Vec<ProductDescription>,
        context: SimulationContext,
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        let cards = vec![CardState::default(); products.len()];
        Self {
            products,
            cards,
            cursor: 0,
            opened: None,
            context,
            preview: PreviewState::default(),
            generation: 0,
            in_flight: false,
            worker_tx,
            worker_rx,
            cancel,
            running: true,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Expand a card, or collapse it if it is already the opened one.
    /// Purely local; never touches the network.
    pub fn toggle(&mut self, idx: usize) {
        if idx >= self.products.len() {
            return;
        }
        self.opened = match self.opened {
            Some(open) if open == idx => None,
            _ => Some(idx),
        };
    }

    /// Launch a preview fetch for the opened card.
    ///
    /// No-op unless the cursor sits on the opened card: the run control only
    /// exists inside the expanded card. Invalid percentage text rejects the
    /// launch with a warning instead of reaching the request path.
    pub fn launch_preview(&mut self) {
        if self.opened != Some(self.cursor) {
            return;
        }
        let idx = self.cursor;

        let percentage = match self.cards[idx].param_input.parse::<SpreadPercentage>() {
            Ok(pct) => pct,
            Err(e) => {
                self.push_error(
                    ErrorCategory::Input,
                    format!("Preview not started: {e}"),
                    self.products[idx].name.clone(),
                );
                return;
            }
        };

        self.generation += 1;
        self.cancel.store(false, Ordering::Relaxed);
        self.in_flight = true;

        let product = self.products[idx].name.clone();
        let _ = self.worker_tx.send(WorkerCommand::RunPreview {
            address: self.context.address.clone(),
            start_date: self.context.start_date,
            percentage,
            generation: self.generation,
            product: format!("{product} @ {percentage}%"),
        });
        self.set_status("Running backtest preview...");
    }

    /// Dismiss the current preview. Only reachable while a card is opened.
    pub fn reset_preview(&mut self) {
        if self.opened.is_none() {
            return;
        }
        self.cancel_in_flight();
        self.preview.reset();
        self.set_status("Preview dismissed");
    }

    /// Cancel whatever fetch is in flight and invalidate its generation.
    pub fn cancel_in_flight(&mut self) {
        if self.in_flight {
            self.cancel.store(true, Ordering::Relaxed);
            self.generation += 1;
            self.in_flight = false;
        }
    }

    /// Route one worker response into state. Stale generations are dropped.
    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::PreviewReady {
                generation,
                product,
                result,
            } => {
                if generation != self.generation {
                    return;
                }
                self.in_flight = false;
                self.preview.apply(*result, product);
                self.set_status("Preview updated");
            }
            WorkerResponse::PreviewFailed { generation, error } => {
                if generation != self.generation {
                    return;
                }
                self.in_flight = false;
                self.push_error(ErrorCategory::Backtest, error, "preview fetch".into());
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spreadlab_core::{AssetsBreakdown, Kpis, PreviewResult};
    use std::sync::mpsc;

    fn make_app() -> (AppState, Receiver<WorkerCommand>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let context =
            SimulationContext::new("0xabc", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        let app = AppState::new(
            ProductDescription::default_catalog(),
            context,
            cmd_tx,
            resp_rx,
            cancel,
        );
        (app, cmd_rx)
    }

    fn sample_result() -> PreviewResult {
        PreviewResult {
            kpis: Kpis::default(),
            assets: AssetsBreakdown::default(),
            data: [("2022-01-01".to_string(), 1.0)].into_iter().collect(),
        }
    }

    #[test]
    fn launch_is_noop_while_collapsed() {
        let (mut app, cmd_rx) = make_app();
        app.launch_preview();
        assert!(cmd_rx.try_recv().is_err());
        assert!(!app.in_flight);
    }

    #[test]
    fn launch_is_noop_when_cursor_leaves_the_opened_card() {
        let (mut app, cmd_rx) = make_app();
        app.toggle(0);
        app.cursor = 2;
        app.launch_preview();
        assert!(cmd_rx.try_recv().is_err());
        assert!(!app.in_flight);
    }

    #[test]
    fn toggling_alone_sends_no_command() {
        let (mut app, cmd_rx) = make_app();
        app.toggle(0);
        assert_eq!(app.opened, Some(0));
        app.toggle(0);
        assert_eq!(app.opened, None);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn opening_a_second_card_collapses_the_first() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.toggle(1);
        assert_eq!(app.opened, Some(1));
    }

    #[test]
    fn launch_sends_command_keyed_by_context_and_param() {
        let (mut app, cmd_rx) = make_app();
        app.toggle(0);
        app.cards[0].param_input = "55".into();
        app.launch_preview();

        match cmd_rx.try_recv().unwrap() {
            WorkerCommand::RunPreview {
                address,
                start_date,
                percentage,
                generation,
                ..
            } => {
                assert_eq!(address, "0xabc");
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
                assert_eq!(percentage.value(), 55);
                assert_eq!(generation, app.generation);
            }
            other => panic!("expected RunPreview, got {other:?}"),
        }
        assert!(app.in_flight);
    }

    #[test]
    fn invalid_param_rejects_the_launch() {
        let (mut app, cmd_rx) = make_app();
        app.toggle(0);
        app.cards[0].param_input = "abc".into();
        app.launch_preview();

        assert!(cmd_rx.try_recv().is_err());
        assert!(!app.in_flight);
        assert_eq!(app.error_history.len(), 1);
        assert_eq!(app.error_history[0].category, ErrorCategory::Input);
    }

    #[test]
    fn current_generation_response_applies() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.launch_preview();

        let generation = app.generation;
        app.handle_worker_response(WorkerResponse::PreviewReady {
            generation,
            product: "Stable Anchor @ 20%".into(),
            result: Box::new(sample_result()),
        });

        assert!(!app.in_flight);
        assert!(!app.preview.is_empty());
        assert_eq!(app.preview.label, "Stable Anchor @ 20%");
    }

    #[test]
    fn stale_generation_response_is_dropped() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.launch_preview();
        let first = app.generation;
        app.launch_preview(); // re-click: bumps the generation

        app.handle_worker_response(WorkerResponse::PreviewReady {
            generation: first,
            product: "stale".into(),
            result: Box::new(sample_result()),
        });

        assert!(app.preview.is_empty());
        assert!(app.in_flight); // still waiting on the newest launch
    }

    #[test]
    fn failed_fetch_leaves_preview_untouched() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.launch_preview();
        let generation = app.generation;

        app.handle_worker_response(WorkerResponse::PreviewFailed {
            generation,
            error: "backtest fetch failed with status: Not Found".into(),
        });

        assert!(app.preview.is_empty());
        assert!(!app.in_flight);
        assert!(app.error_history[0].message.contains("Not Found"));
    }

    #[test]
    fn reset_requires_an_opened_card() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.launch_preview();
        let generation = app.generation;
        app.handle_worker_response(WorkerResponse::PreviewReady {
            generation,
            product: "x".into(),
            result: Box::new(sample_result()),
        });

        app.toggle(0); // collapse
        app.reset_preview();
        assert!(!app.preview.is_empty()); // unreachable while collapsed

        app.toggle(0);
        app.reset_preview();
        assert!(app.preview.is_empty());
    }

    #[test]
    fn cancel_invalidates_the_in_flight_generation() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.launch_preview();
        let launched = app.generation;

        app.cancel_in_flight();
        assert!(app.cancel.load(Ordering::Relaxed));

        app.handle_worker_response(WorkerResponse::PreviewReady {
            generation: launched,
            product: "late".into(),
            result: Box::new(sample_result()),
        });
        assert!(app.preview.is_empty());
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _cmd_rx) = make_app();
        for i in 0..60 {
            app.push_error(ErrorCategory::Other, format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }

    #[test]
    fn param_buffer_survives_collapse() {
        let (mut app, _cmd_rx) = make_app();
        app.toggle(0);
        app.cards[0].param_input = "75".into();
        app.toggle(0);
        app.toggle(0);
        assert_eq!(app.cards[0].param_input, "75");
    }
}
