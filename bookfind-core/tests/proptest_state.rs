use bookfind_core::{BookSummary, FetchTag, SearchPage, SearchState, PAGE_SIZE};
use proptest::prelude::*;

fn arb_doc() -> impl Strategy<Value = BookSummary> {
    (
        "[a-z0-9/]{1,12}",
        ".{0,40}",
        prop::collection::vec("[A-Za-z .]{1,20}", 0..3),
        prop::option::of(any::<u32>()),
    )
        .prop_map(|(key, title, author_names, cover)| BookSummary {
            key,
            title,
            author_names,
            cover_id: cover.map(u64::from),
        })
}

fn arb_page() -> impl Strategy<Value = SearchPage> {
    (prop::collection::vec(arb_doc(), 0..5), 0u64..100_000).prop_map(|(docs, num_found)| {
        SearchPage { docs, num_found }
    })
}

proptest! {
    /// Property: total_pages is always >= 1 and covers num_found
    #[test]
    fn prop_total_pages_covers_matches(num_found in 0u64..10_000_000) {
        let mut state = SearchState::new();
        let tag = state.submit("q").unwrap();
        state.apply(&tag, Ok(SearchPage { docs: vec![], num_found }));

        let total = u64::from(state.total_pages());
        prop_assert!(total >= 1);
        prop_assert!(total * u64::from(PAGE_SIZE) >= num_found);
        if num_found > 0 {
            // No trailing empty page
            prop_assert!((total - 1) * u64::from(PAGE_SIZE) < num_found);
        }
    }

    /// Property: after any accepted navigation, page stays in range
    #[test]
    fn prop_page_stays_in_range(
        num_found in 0u64..100_000,
        targets in prop::collection::vec(any::<u32>(), 0..20),
    ) {
        let mut state = SearchState::new();
        let tag = state.submit("q").unwrap();
        state.apply(&tag, Ok(SearchPage { docs: vec![], num_found }));

        for target in targets {
            if let Some(tag) = state.go_to_page(target) {
                prop_assert_eq!(tag.page, target);
                state.apply(&tag, Ok(SearchPage { docs: vec![], num_found }));
            }
            prop_assert!(state.page() >= 1);
            prop_assert!(state.page() <= state.total_pages());
        }
    }

    /// Property: a response tagged with anything but the current
    /// (query, page) never changes state
    #[test]
    fn prop_stale_apply_is_noop(
        query in "[a-z]{1,8}",
        stale_query in "[a-z]{1,8}",
        stale_page in 2u32..1000,
        page in arb_page(),
    ) {
        let mut state = SearchState::new();
        let tag = state.submit(&query).unwrap();
        state.apply(&tag, Ok(page.clone()));
        let before = state.clone();

        // Wrong page is always stale (current page is 1)
        state.apply(&FetchTag { query: query.clone(), page: stale_page }, Ok(page.clone()));
        prop_assert_eq!(&state, &before);

        // Wrong query is stale too
        prop_assume!(stale_query != query);
        state.apply(&FetchTag { query: stale_query, page: 1 }, Err("late failure".to_string()));
        prop_assert_eq!(&state, &before);
    }

    /// Property: clear always yields the initial record
    #[test]
    fn prop_clear_resets(query in "\\PC{1,16}", page in arb_page()) {
        let mut state = SearchState::new();
        if let Some(tag) = state.submit(&query) {
            state.apply(&tag, Ok(page));
        }
        state.clear();
        prop_assert_eq!(state, SearchState::new());
    }
}
