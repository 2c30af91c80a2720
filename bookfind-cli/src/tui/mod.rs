//! Interactive browse mode for bookfind
//!
//! A small ratatui front end over the search controller:
//! - Input bar for the title query (Enter submits)
//! - Result list with title/author/cover marker per match
//! - Next/previous page navigation with a `Page x / y` footer
//! - Status line for loading, errors, and empty result sets

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::{App, Mode};
pub use terminal::{run, BrowseArgs};
