//! Keyboard input dispatch — global keys → overlays → card actions.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::app::{AppState, Overlay};

/// Maximum digits in the percentage field ("100").
const PARAM_MAX_LEN: usize = 3;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Welcome => {
            app.overlay = Overlay::None;
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    handle_card_key(app, key);
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_card_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.products.len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Enter | KeyCode::Char('l') => {
            app.toggle(app.cursor);
        }
        KeyCode::Char('h') => {
            // Collapse, regardless of which card is opened.
            if app.opened.is_some() {
                app.opened = None;
            }
        }
        KeyCode::Char('r') => {
            app.launch_preview();
        }
        KeyCode::Char('x') => {
            app.reset_preview();
        }
        KeyCode::Esc => {
            if app.in_flight {
                app.cancel_in_flight();
                app.set_warning("Cancelling preview...");
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            // The percentage field belongs to the opened card only.
            if let Some(idx) = app.opened {
                let buf = &mut app.cards[idx].param_input;
                if buf.len() < PARAM_MAX_LEN {
                    buf.push(c);
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(idx) = app.opened {
                app.cards[idx].param_input.pop();
            }
        }
        _ => {}
    }
}
