//! Application state for the browse TUI

use bookfind_core::{SearchController, SearchState};

/// Input mode (vim-style switching between list and query editing)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the result list
    Normal,
    /// Editing the query in the input bar
    Input,
}

/// Main application state
pub struct App {
    /// Current mode
    pub mode: Mode,

    /// Query text being edited in the input bar
    pub input: String,

    /// Selected row in the result list
    pub selected_index: usize,

    /// Search state owner and fetch dispatcher
    pub controller: SearchController,
}

impl App {
    pub fn new(controller: SearchController) -> Self {
        Self {
            mode: Mode::Input, // start in the input bar, like a search page
            input: String::new(),
            selected_index: 0,
            controller,
        }
    }

    /// Snapshot of the search state for rendering
    pub fn state(&self) -> &SearchState {
        self.controller.state()
    }

    /// Apply completed fetches and keep the selection in bounds
    pub fn tick(&mut self) {
        if self.controller.drain_outcomes() > 0 {
            self.clamp_selection();
        }
    }

    /// Submit the input bar's text as a new search
    pub fn submit_input(&mut self) {
        let text = self.input.clone();
        self.controller.submit_search(&text);
        self.selected_index = 0;
        self.mode = Mode::Normal;
    }

    /// Clear the search and the input bar
    pub fn clear_search(&mut self) {
        self.controller.clear();
        self.input.clear();
        self.selected_index = 0;
        self.mode = Mode::Input;
    }

    pub fn select_next(&mut self) {
        let len = self.state().results.len();
        if len > 0 && self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.state().results.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }
}
