use crate::state::LoadOutcome;
use crate::{CatalogueState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
///
/// Every accepted change to the query yields a `ReplaceUrl` followed by a
/// `FetchPage`; initialization only fetches, since the address bar already
/// holds the query it was read from.
pub fn update(mut state: CatalogueState, msg: Msg) -> (CatalogueState, Vec<Effect>) {
    let effects = match msg {
        Msg::Initialized(query) => {
            if state.initialize(query) {
                vec![fetch_effect(&mut state)]
            } else {
                Vec::new()
            }
        }
        Msg::SortChanged(sort) => {
            if state.set_sort(sort) {
                query_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageSizeChanged(page_size) => {
            if state.set_page_size(page_size) {
                query_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageRequested(page) => {
            if state.set_page(page) {
                query_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::Navigate(nav) => {
            let target = nav.target(state.query().page, state.total_pages());
            match target {
                Some(page) if state.set_page(page) => query_changed(&mut state),
                _ => Vec::new(),
            }
        }
        Msg::RetryClicked => {
            if state.can_retry() {
                vec![fetch_effect(&mut state)]
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded { request_id, result } => match state.apply_loaded(request_id, result) {
            LoadOutcome::Clamped => query_changed(&mut state),
            LoadOutcome::Committed | LoadOutcome::Stale => Vec::new(),
        },
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn query_changed(state: &mut CatalogueState) -> Vec<Effect> {
    let query = *state.query();
    vec![Effect::ReplaceUrl { query }, fetch_effect(state)]
}

fn fetch_effect(state: &mut CatalogueState) -> Effect {
    let request_id = state.begin_fetch();
    Effect::FetchPage {
        request_id,
        query: *state.query(),
    }
}
