use std::sync::Once;

use catalogue_core::{
    update, CatalogueState, Effect, FetchPhase, Msg, PageData, PageNav, PageSize, QueryState,
    Record, RequestId,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalogue_logging::initialize_for_tests);
}

fn fetch_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("fetch effect")
}

fn records(first_id: u64, count: u64) -> Vec<Record> {
    (first_id..first_id + count)
        .map(|id| Record {
            id,
            title: format!("Idea {id}"),
            content: format!("<p>Body of idea {id}</p>"),
            published_at: Some("2024-05-17 09:30:00".to_string()),
            slug: format!("idea-{id}"),
            small_image: None,
            medium_image: Some(format!("https://cdn.example.com/{id}.jpg")),
        })
        .collect()
}

fn page(first_id: u64, count: u64, total_items: u64) -> Result<PageData, String> {
    Ok(PageData {
        records: records(first_id, count),
        total_items,
    })
}

fn initialized(query: QueryState) -> (CatalogueState, RequestId) {
    let (state, effects) = update(CatalogueState::new(), Msg::Initialized(query));
    let request_id = fetch_id(&effects);
    (state, request_id)
}

#[test]
fn successful_response_commits_records_and_totals() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());

    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let fetch = state.fetch_result();
    assert_eq!(fetch.phase, FetchPhase::Success);
    assert_eq!(fetch.records.len(), 10);
    assert_eq!(fetch.total_items, 156);
    assert_eq!(fetch.total_pages, 16);
    assert_eq!(fetch.error_message, None);
    assert_eq!(state.awaiting_request(), None);

    let view = state.view();
    assert_eq!(view.cards.len(), 10);
    assert_eq!(view.cards[0].formatted_date.as_deref(), Some("17 Mei 2024"));
    assert_eq!(view.summary(), "Showing 1-10 of 156");
    assert!(view.show_pager);
}

#[test]
fn http_error_clears_records_and_retry_reissues_same_query() {
    init_logging();
    let query = QueryState {
        page: 2,
        ..QueryState::default()
    };
    let (state, request_id) = initialized(query);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: Err("http status 500: Internal Server Error".to_string()),
        },
    );
    assert!(effects.is_empty());
    let fetch = state.fetch_result();
    assert_eq!(fetch.phase, FetchPhase::Error);
    assert!(fetch.records.is_empty());
    assert_eq!(
        fetch.error_message.as_deref(),
        Some("http status 500: Internal Server Error")
    );
    assert!(state.view().cards.is_empty());

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            request_id: request_id + 1,
            query
        }]
    );
    assert_eq!(state.fetch_result().phase, FetchPhase::Loading);
    assert_eq!(state.fetch_result().error_message, None);
}

#[test]
fn error_after_success_does_not_keep_old_records() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );
    let (state, effects) = update(state, Msg::PageRequested(2));

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: fetch_id(&effects),
            result: Err("network error".to_string()),
        },
    );

    assert_eq!(state.fetch_result().phase, FetchPhase::Error);
    assert!(state.fetch_result().records.is_empty());
    // Navigation still works off the last known totals.
    assert_eq!(state.total_pages(), 16);
}

#[test]
fn retry_is_ignored_unless_the_last_fetch_failed() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());

    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );
    let (_state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
}

#[test]
fn stale_response_does_not_overwrite_newer_page() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );

    // Page 1 at 20 per page goes out, then the user moves to page 2 before it lands.
    let (state, page_one) = update(state, Msg::PageSizeChanged(PageSize::Twenty));
    let (state, page_two) = update(state, Msg::PageRequested(2));
    let page_one_id = fetch_id(&page_one);
    let page_two_id = fetch_id(&page_two);
    assert!(page_two_id > page_one_id);

    let (mut state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: page_one_id,
            result: page(1, 20, 156),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.query().page, 2);
    assert_eq!(state.fetch_result().phase, FetchPhase::Loading);
    assert!(state.fetch_result().records.is_empty());
    assert_eq!(state.awaiting_request(), Some(page_two_id));
    state.consume_dirty();

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: page_two_id,
            result: page(21, 20, 156),
        },
    );
    assert_eq!(state.fetch_result().phase, FetchPhase::Success);
    assert_eq!(state.fetch_result().records[0].id, 21);
    assert_eq!(state.view().summary(), "Showing 21-40 of 156");
}

#[test]
fn stale_failure_is_also_dropped() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );
    let (state, first) = update(state, Msg::PageRequested(2));
    let (state, second) = update(state, Msg::PageRequested(3));
    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: fetch_id(&second),
            result: page(21, 10, 156),
        },
    );
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: fetch_id(&first),
            result: Err("timeout".to_string()),
        },
    );

    assert!(!state.consume_dirty());
    assert_eq!(state.fetch_result().phase, FetchPhase::Success);
    assert_eq!(state.query().page, 3);
}

#[test]
fn duplicate_completion_is_ignored() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, 156),
        },
    );
    let before = state.fetch_result().clone();

    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: Err("late duplicate".to_string()),
        },
    );

    assert_eq!(*state.fetch_result(), before);
}

#[test]
fn url_seeded_page_beyond_range_is_clamped() {
    init_logging();
    let (state, request_id) = initialized(QueryState {
        page: 40,
        ..QueryState::default()
    });
    assert_eq!(state.query().page, 40);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 0, 156),
        },
    );

    let clamped = QueryState {
        page: 16,
        ..QueryState::default()
    };
    assert_eq!(*state.query(), clamped);
    assert_eq!(
        effects,
        vec![
            Effect::ReplaceUrl { query: clamped },
            Effect::FetchPage {
                request_id: request_id + 1,
                query: clamped
            },
        ]
    );
    assert_eq!(state.fetch_result().phase, FetchPhase::Loading);
    assert_eq!(state.total_items(), Some(156));
}

#[test]
fn empty_collection_clamps_to_first_page_once() {
    init_logging();
    let (state, request_id) = initialized(QueryState {
        page: 3,
        ..QueryState::default()
    });

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 0, 0),
        },
    );
    assert_eq!(state.query().page, 1);
    let refetch = fetch_id(&effects);

    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: refetch,
            result: page(1, 0, 0),
        },
    );
    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.phase, FetchPhase::Success);
    assert_eq!(view.summary(), "Showing 0-0 of 0");
    assert_eq!(view.total_pages, 0);
    assert!(!view.show_pager);
    assert!(view.pager.pages.is_empty());
}

#[test]
fn huge_collection_renders_its_last_page() {
    init_logging();
    let (state, request_id) = initialized(QueryState::default());
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id,
            result: page(1, 10, u64::MAX),
        },
    );
    assert_eq!(state.total_pages(), u32::MAX);

    let (state, effects) = update(state, Msg::Navigate(PageNav::Last));
    assert_eq!(effects.len(), 2);
    assert_eq!(state.query().page, u32::MAX);

    let view = state.view();
    assert_eq!(view.pager.pages.last(), Some(&u32::MAX));
    assert_eq!(view.pager.pages.len(), 5);
    assert!(!view.pager.next_enabled);
}
