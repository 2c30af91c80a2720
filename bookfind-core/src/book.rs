//! Book view-model types and presentation helpers.
//!
//! `BookSummary` is the read-only shape the rest of the system works
//! with; decoding from the OpenLibrary wire format lives in
//! bookfind-search. The cover/author helpers are pure functions so the
//! presentation layers (CLI printer, TUI) can call them without any
//! network access.

use serde::{Deserialize, Serialize};

/// Base URL for the OpenLibrary cover image service
pub const COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Placeholder shown when a book has no cover
pub const COVER_PLACEHOLDER: &str = "https://via.placeholder.com/150x200?text=No+Cover";

/// One book from a search result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    /// Unique work identifier (e.g. "/works/OL893415W")
    pub key: String,
    /// Display title
    pub title: String,
    /// Author names in API order; empty when the API reports none
    pub author_names: Vec<String>,
    /// Cover image id, absent when the work has no cover
    pub cover_id: Option<u64>,
}

/// Decoded success payload of one search fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Matches on this page, API response order preserved
    pub docs: Vec<BookSummary>,
    /// Total matches for the query across all pages
    pub num_found: u64,
}

/// Resolve a cover id to a display URL.
///
/// Deterministic and stateless: `Some(id)` maps to the medium-size
/// cover on the OpenLibrary image host, `None` to a fixed placeholder.
pub fn cover_url(cover_id: Option<u64>) -> String {
    match cover_id {
        Some(id) => format!("{}/{}-M.jpg", COVERS_BASE, id),
        None => COVER_PLACEHOLDER.to_string(),
    }
}

/// Comma-joined author line, with a fallback for books that have none.
pub fn author_line(author_names: &[String]) -> String {
    if author_names.is_empty() {
        "Unknown Author".to_string()
    } else {
        author_names.join(", ")
    }
}

impl BookSummary {
    /// Display URL for this book's cover (placeholder when absent)
    pub fn cover_url(&self) -> String {
        cover_url(self.cover_id)
    }

    /// Display line for this book's authors
    pub fn author_line(&self) -> String {
        author_line(&self.author_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_url_present() {
        assert_eq!(
            cover_url(Some(123)),
            "https://covers.openlibrary.org/b/id/123-M.jpg"
        );
    }

    #[test]
    fn test_cover_url_absent() {
        assert_eq!(cover_url(None), COVER_PLACEHOLDER);
    }

    #[test]
    fn test_author_line() {
        let authors = vec!["Frank Herbert".to_string(), "Brian Herbert".to_string()];
        assert_eq!(author_line(&authors), "Frank Herbert, Brian Herbert");
        assert_eq!(author_line(&[]), "Unknown Author");
    }
}
