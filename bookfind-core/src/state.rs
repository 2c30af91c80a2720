//! Search pagination state machine.
//!
//! `SearchState` is the single mutable record behind the search UI:
//! query text, current page, total match count, loading/error status,
//! and the displayed result page. Transitions are pure: a mutator
//! either rejects the intent (returning no tag) or updates the record
//! and returns the `FetchTag` the caller must dispatch. Fetch
//! resolutions come back through [`SearchState::apply`], which drops
//! any response whose tag no longer matches the current
//! `(query, page)`. That tag check is what makes overlapping fetches
//! safe: last-write-wins follows trigger order, not completion order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::book::{BookSummary, SearchPage};

/// Fixed page length requested from the search endpoint
pub const PAGE_SIZE: u32 = 20;

/// Offset parameter for a 1-based page number, `(page - 1) * PAGE_SIZE`.
///
/// Widened to u64 so an absurd page number degrades into an empty
/// result page instead of overflowing.
pub fn page_offset(page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(PAGE_SIZE)
}

/// Identity of one fetch: the `(query, page)` it was issued for.
///
/// Compared against current state when the response arrives; a
/// mismatch means the response is stale and is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTag {
    pub query: String,
    pub page: u32,
}

impl FetchTag {
    /// Offset parameter for the search endpoint
    pub fn offset(&self) -> u64 {
        page_offset(self.page)
    }
}

/// Resolution of one fetch, paired with its tag on the way back
pub type FetchOutcome = Result<SearchPage, String>;

/// Mutable search session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Last submitted search text; empty means no search active
    pub query: String,
    /// Current 1-based page number
    page: u32,
    /// Current page's matches, API response order preserved
    pub results: Vec<BookSummary>,
    /// Total matches reported by the API for `query`
    pub num_found: u64,
    /// True while a fetch for the current `(query, page)` is outstanding
    pub loading: bool,
    /// Last fetch failure message, cleared on every new attempt
    pub error: Option<String>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    /// Current 1-based page number
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Total pages for the current result count, floored at 1 so the
    /// pager's denominator stays sane even with zero results.
    pub fn total_pages(&self) -> u32 {
        let pages = self.num_found.div_ceil(u64::from(PAGE_SIZE));
        pages.clamp(1, u64::from(u32::MAX)) as u32
    }

    /// True once a search has been submitted and resolved to an empty page
    pub fn no_results(&self) -> bool {
        !self.query.is_empty() && !self.loading && self.error.is_none() && self.results.is_empty()
    }

    /// Submit a new search.
    ///
    /// Whitespace-only text is a no-op. Otherwise the query is
    /// recorded, the page resets to 1, any prior error is cleared, and
    /// the tag to dispatch is returned.
    pub fn submit(&mut self, text: &str) -> Option<FetchTag> {
        if text.trim().is_empty() {
            return None;
        }
        self.query = text.to_string();
        self.page = 1;
        self.begin_fetch()
    }

    /// Reset to the initial record. Idempotent, never fetches.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Navigate to an absolute page.
    ///
    /// Rejected when `target` is out of `[1, total_pages]` or no query
    /// is active; otherwise the page is updated and the tag to
    /// dispatch is returned.
    pub fn go_to_page(&mut self, target: u32) -> Option<FetchTag> {
        if self.query.is_empty() || target < 1 || target > self.total_pages() {
            return None;
        }
        self.page = target;
        self.begin_fetch()
    }

    /// Navigate one page forward (no-op at the last page)
    pub fn next_page(&mut self) -> Option<FetchTag> {
        self.go_to_page(self.page.saturating_add(1))
    }

    /// Navigate one page back (no-op at page 1)
    pub fn prev_page(&mut self) -> Option<FetchTag> {
        if self.page <= 1 {
            return None;
        }
        self.go_to_page(self.page - 1)
    }

    /// Apply a fetch resolution.
    ///
    /// Stale responses, where the tag no longer equals the current
    /// `(query, page)`, are discarded without touching state. A
    /// failure stores the message and keeps the prior results visible.
    pub fn apply(&mut self, tag: &FetchTag, outcome: FetchOutcome) {
        if tag.query != self.query || tag.page != self.page {
            debug!(
                stale_query = %tag.query,
                stale_page = tag.page,
                current_page = self.page,
                "discarding stale fetch response"
            );
            return;
        }
        match outcome {
            Ok(page) => {
                self.results = page.docs;
                self.num_found = page.num_found;
                self.loading = false;
            }
            Err(message) => {
                self.error = Some(message);
                self.loading = false;
            }
        }
    }

    fn begin_fetch(&mut self) -> Option<FetchTag> {
        self.error = None;
        self.loading = true;
        Some(FetchTag {
            query: self.query.clone(),
            page: self.page,
        })
    }
}
