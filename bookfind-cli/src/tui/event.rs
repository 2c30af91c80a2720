//! Event handling for the browse TUI

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling a key event
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Handle a key event
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcut (Ctrl+C)
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return HandleResult::Quit;
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Input => handle_input_mode(app, key),
    }
}

/// Handle keys in normal (list navigation) mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => return HandleResult::Quit,

        // Selection within the page
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),

        // Pagination (no-ops at the bounds, enforced by the state machine)
        KeyCode::Char('n') | KeyCode::Right => app.controller.next_page(),
        KeyCode::Char('p') | KeyCode::Left => app.controller.prev_page(),

        // Edit the query
        KeyCode::Char('/') | KeyCode::Char('i') => app.mode = Mode::Input,

        // Clear the search
        KeyCode::Char('c') => app.clear_search(),

        _ => {}
    }
    HandleResult::Continue
}

/// Handle keys while editing the query
fn handle_input_mode(app: &mut App, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc => {
            // Revert the input bar to the active query
            app.input = app.state().query.clone();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
    HandleResult::Continue
}
