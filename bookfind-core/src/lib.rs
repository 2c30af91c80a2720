pub mod book;
pub mod controller;
pub mod error;
pub mod state;

pub use book::{author_line, cover_url, BookSummary, SearchPage};
pub use controller::{SearchBackend, SearchController};
pub use error::{BookError, Result};
pub use state::{page_offset, FetchOutcome, FetchTag, SearchState, PAGE_SIZE};
