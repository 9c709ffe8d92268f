use std::sync::Arc;
use std::time::{Duration, Instant};

use catalogue_engine::{
    parse_collection_page, CollectionClient, CollectionPage, EngineEvent, EngineHandle,
    FailureKind, FetchError, PageRequest,
};

/// Answers page 1 slowly and every other page immediately.
struct SlowFirstPage;

#[async_trait::async_trait]
impl CollectionClient for SlowFirstPage {
    async fn fetch_page(&self, request: &PageRequest) -> Result<CollectionPage, FetchError> {
        if request.page_number == 1 {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        if request.page_number == 99 {
            return parse_collection_page(b"{}");
        }
        parse_collection_page(
            format!(
                r#"{{"data": [], "meta": {{"total": 30, "last_page": 3, "current_page": {}, "per_page": 10}}}}"#,
                request.page_number
            )
            .as_bytes(),
        )
    }
}

fn request(page_number: u32) -> PageRequest {
    PageRequest {
        page_number,
        page_size: 10,
        sort: "-published_at".to_string(),
    }
}

fn wait_for_events(engine: &EngineHandle, count: usize) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < count && Instant::now() < deadline {
        match engine.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    events
}

#[test]
fn results_arrive_tagged_in_completion_order() {
    let engine = EngineHandle::with_client(Arc::new(SlowFirstPage)).expect("engine");

    engine.fetch_page(1, request(1));
    engine.fetch_page(2, request(2));

    let events = wait_for_events(&engine, 2);
    let order: Vec<_> = events
        .iter()
        .map(|event| match event {
            EngineEvent::PageFetched { request_id, result } => {
                (*request_id, result.as_ref().map(|page| page.meta.current_page).ok())
            }
        })
        .collect();
    assert_eq!(order, vec![(2, Some(2)), (1, Some(1))]);
}

#[test]
fn failures_are_reported_as_events() {
    let engine = EngineHandle::with_client(Arc::new(SlowFirstPage)).expect("engine");

    engine.fetch_page(5, request(99));

    let events = wait_for_events(&engine, 1);
    match events.as_slice() {
        [EngineEvent::PageFetched {
            request_id: 5,
            result: Err(err),
        }] => assert_eq!(err.kind, FailureKind::MalformedBody),
        other => panic!("unexpected events: {other:?}"),
    }
}
