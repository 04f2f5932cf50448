//! Spreadlab TUI — product cards for previewing spread backtests.
//!
//! The layout mirrors the hosting application's product list: cards on the
//! left (one expandable at a time), the shared preview state on the right.
//! All fetches run on a background worker thread; the main loop stays
//! responsive and drains responses every frame.

mod app;
mod config;
mod input;
mod preview;
mod preview_service;
mod theme;
mod ui;
mod worker;

use std::io::{self, stdout};
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use spreadlab_core::{ProductDescription, SimulationContext};

use crate::app::{AppState, Overlay};
use crate::preview_service::ClientService;
use crate::worker::WorkerCommand;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Configuration (backend URL, treasury address, start date).
    let config_path = config::default_path();
    let cfg = config::load(&config_path);
    let context = SimulationContext::new(cfg.address.clone(), cfg.start_date);

    // Worker channels.
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let cancel = Arc::new(AtomicBool::new(false));

    let service = Arc::new(ClientService::new(cfg.backend_url.clone()));
    let worker_handle = worker::spawn_worker(service, cmd_rx, resp_tx, cancel.clone());

    // Build app state.
    let mut app = AppState::new(
        ProductDescription::default_catalog(),
        context,
        cmd_tx.clone(),
        resp_rx,
        cancel,
    );
    app.overlay = Overlay::Welcome;

    // Setup terminal.
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop.
    let result = run_app(&mut terminal, &mut app);

    // Persist config (it may grow editable fields later).
    let _ = config::save(&config_path, &cfg);

    // Shutdown worker.
    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render.
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Drain worker responses (non-blocking).
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 3. Poll for input events (50ms timeout for ~20 FPS tick).
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 4. Check quit.
        if !app.running {
            break;
        }
    }
    Ok(())
}
