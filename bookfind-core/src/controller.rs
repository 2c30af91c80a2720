//! Fetch orchestration around the search state machine.
//!
//! [`SearchController`] owns the [`SearchState`] record plus the
//! transport seam: user intents run the pure transition, and when a
//! transition yields a [`FetchTag`] the controller spawns one backend
//! fetch whose resolution is sent back over an mpsc channel. The
//! caller's event loop pumps completions back in via
//! [`SearchController::drain_outcomes`] (non-blocking, TUI tick) or
//! [`SearchController::recv_outcome`] (await one, one-shot flows).
//!
//! Overlapping fetches are allowed; there is no cancellation. The tag
//! check inside `SearchState::apply` keeps a late-arriving stale
//! response from clobbering newer state.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::book::SearchPage;
use crate::error::Result;
use crate::state::{FetchOutcome, FetchTag, SearchState, PAGE_SIZE};

/// Transport seam for one paginated title search.
///
/// Implemented by the OpenLibrary HTTP client in bookfind-search and
/// by fakes in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    /// Fetch one page of matches for `query`. `limit` is the page
    /// length, `offset` the number of matches to skip.
    async fn search(&self, query: &str, limit: u32, offset: u64) -> Result<SearchPage>;
}

/// Owns the search state and dispatches fetches against a backend
pub struct SearchController {
    state: SearchState,
    backend: Arc<dyn SearchBackend>,
    outcome_tx: mpsc::UnboundedSender<(FetchTag, FetchOutcome)>,
    outcome_rx: mpsc::UnboundedReceiver<(FetchTag, FetchOutcome)>,
}

impl SearchController {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::new(),
            backend,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Snapshot read of the current state (single-owner, no locking)
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Submit a new search; whitespace-only text issues no fetch
    pub fn submit_search(&mut self, text: &str) {
        let tag = self.state.submit(text);
        self.dispatch(tag);
    }

    /// Reset to the initial state; never fetches
    pub fn clear(&mut self) {
        self.state.clear();
    }

    /// Navigate to an absolute page; out-of-range targets are rejected
    pub fn go_to_page(&mut self, target: u32) {
        let tag = self.state.go_to_page(target);
        self.dispatch(tag);
    }

    /// Navigate one page forward (no-op at the last page)
    pub fn next_page(&mut self) {
        let tag = self.state.next_page();
        self.dispatch(tag);
    }

    /// Navigate one page back (no-op at page 1)
    pub fn prev_page(&mut self) {
        let tag = self.state.prev_page();
        self.dispatch(tag);
    }

    /// Apply every completed fetch currently queued. Non-blocking;
    /// returns the number applied (stale discards included).
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((tag, outcome)) = self.outcome_rx.try_recv() {
            self.state.apply(&tag, outcome);
            applied += 1;
        }
        applied
    }

    /// Await the next completed fetch and apply it. Returns false if
    /// the channel is closed (cannot happen while the controller holds
    /// its own sender, but callers should not loop on it blindly).
    pub async fn recv_outcome(&mut self) -> bool {
        match self.outcome_rx.recv().await {
            Some((tag, outcome)) => {
                self.state.apply(&tag, outcome);
                true
            }
            None => false,
        }
    }

    /// Spawn one backend fetch for `tag`. Both the initial search and
    /// page changes funnel through here, so the two paths cannot
    /// diverge.
    fn dispatch(&self, tag: Option<FetchTag>) {
        let Some(tag) = tag else { return };
        debug!(query = %tag.query, page = tag.page, "dispatching fetch");
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = backend
                .search(&tag.query, PAGE_SIZE, tag.offset())
                .await
                .map_err(|err| err.to_string());
            // Receiver dropped means the session is over; nothing to do.
            let _ = tx.send((tag, outcome));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookSummary;
    use crate::error::BookError;

    struct StaticBackend {
        page: SearchPage,
    }

    #[async_trait]
    impl SearchBackend for StaticBackend {
        async fn search(&self, _query: &str, _limit: u32, _offset: u64) -> Result<SearchPage> {
            Ok(self.page.clone())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl SearchBackend for FailingBackend {
        async fn search(&self, _query: &str, _limit: u32, _offset: u64) -> Result<SearchPage> {
            Err(BookError::fetch("connection refused"))
        }
    }

    fn sample_page() -> SearchPage {
        SearchPage {
            docs: vec![BookSummary {
                key: "/works/1".to_string(),
                title: "Dune".to_string(),
                author_names: vec!["Frank Herbert".to_string()],
                cover_id: Some(123),
            }],
            num_found: 1,
        }
    }

    #[tokio::test]
    async fn test_submit_and_receive() {
        let backend = Arc::new(StaticBackend {
            page: sample_page(),
        });
        let mut controller = SearchController::new(backend);

        controller.submit_search("dune");
        assert!(controller.state().loading);
        assert!(controller.recv_outcome().await);

        let state = controller.state();
        assert!(!state.loading);
        assert_eq!(state.num_found, 1);
        assert_eq!(state.results[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_whitespace_submit_issues_no_fetch() {
        let backend = Arc::new(StaticBackend {
            page: sample_page(),
        });
        let mut controller = SearchController::new(backend);

        controller.submit_search("   ");
        assert!(!controller.state().loading);
        assert_eq!(controller.drain_outcomes(), 0);
    }

    #[tokio::test]
    async fn test_failure_stored_as_error() {
        let mut controller = SearchController::new(Arc::new(FailingBackend));

        controller.submit_search("dune");
        assert!(controller.recv_outcome().await);

        let state = controller.state();
        assert!(!state.loading);
        let message = state.error.as_deref().expect("error stored");
        assert!(message.contains("connection refused"));
        assert!(state.results.is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_state() {
        let backend = Arc::new(StaticBackend {
            page: sample_page(),
        });
        let mut controller = SearchController::new(backend);

        controller.submit_search("dune");
        controller.recv_outcome().await;
        controller.clear();

        let state = controller.state();
        assert!(state.query.is_empty());
        assert!(state.results.is_empty());
        assert_eq!(state.num_found, 0);
        assert_eq!(state.page(), 1);
    }
}
