use catalogue_core::{Msg, PageData, QueryState, Record, RequestId};
use catalogue_engine::{
    ApiRecord, CollectionPage, CollectionSettings, EngineError, EngineEvent, EngineHandle,
    FetchError, PageRequest,
};
use catalogue_logging::{catalogue_info, catalogue_warn};

/// Sink for `Effect::FetchPage`. The engine in production, a recorder in tests.
pub trait FetchDispatch {
    fn fetch(&self, request_id: RequestId, query: &QueryState);
}

pub struct EngineDispatcher {
    engine: EngineHandle,
}

impl EngineDispatcher {
    pub fn new(settings: CollectionSettings) -> Result<Self, EngineError> {
        Ok(Self {
            engine: EngineHandle::new(settings)?,
        })
    }

    /// Next finished fetch, translated into a core message.
    pub fn poll(&self) -> Option<Msg> {
        self.engine.try_recv().map(|event| match event {
            EngineEvent::PageFetched { request_id, result } => Msg::PageLoaded {
                request_id,
                result: result.map(page_data).map_err(|err| {
                    catalogue_warn!("Request {} failed: {}", request_id, err);
                    failure_message(&err)
                }),
            },
        })
    }
}

impl FetchDispatch for EngineDispatcher {
    fn fetch(&self, request_id: RequestId, query: &QueryState) {
        let request = page_request(query);
        catalogue_info!(
            "FetchPage request_id={} page={} size={} sort={}",
            request_id,
            request.page_number,
            request.page_size,
            request.sort
        );
        self.engine.fetch_page(request_id, request);
    }
}

pub fn page_request(query: &QueryState) -> PageRequest {
    PageRequest {
        page_number: query.page,
        page_size: query.page_size.get(),
        sort: query.sort.api_key().to_string(),
    }
}

pub fn page_data(page: CollectionPage) -> PageData {
    PageData {
        total_items: page.meta.total,
        records: page.data.into_iter().map(to_record).collect(),
    }
}

fn to_record(record: ApiRecord) -> Record {
    Record {
        id: record.id,
        small_image: record.small_image_url().map(str::to_string),
        medium_image: record.medium_image_url().map(str::to_string),
        title: record.title,
        content: record.content,
        published_at: record.published_at,
        slug: record.slug,
    }
}

pub fn failure_message(err: &FetchError) -> String {
    format!("Could not load the collection ({err})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue_core::{PageSize, SortOrder};
    use catalogue_engine::{ImageVariant, PageMeta};
    use pretty_assertions::assert_eq;

    #[test]
    fn query_maps_to_api_terms() {
        let query = QueryState {
            sort: SortOrder::Oldest,
            page_size: PageSize::Fifty,
            page: 4,
        };
        assert_eq!(
            page_request(&query),
            PageRequest {
                page_number: 4,
                page_size: 50,
                sort: "published_at".to_string(),
            }
        );
        assert_eq!(page_request(&QueryState::default()).sort, "-published_at");
    }

    #[test]
    fn collection_page_maps_to_records() {
        let page = CollectionPage {
            data: vec![ApiRecord {
                id: 7,
                title: "Seven".to_string(),
                content: "<p>body</p>".to_string(),
                slug: "seven".to_string(),
                published_at: Some("2024-05-17 08:00:00".to_string()),
                small_image: vec![ImageVariant {
                    url: "https://cdn.test/s.jpg".to_string(),
                }],
                medium_image: Vec::new(),
            }],
            meta: PageMeta {
                total: 156,
                last_page: 16,
                current_page: 1,
                per_page: 10,
            },
        };

        let data = page_data(page);
        assert_eq!(data.total_items, 156);
        assert_eq!(
            data.records,
            vec![Record {
                id: 7,
                title: "Seven".to_string(),
                content: "<p>body</p>".to_string(),
                published_at: Some("2024-05-17 08:00:00".to_string()),
                slug: "seven".to_string(),
                small_image: Some("https://cdn.test/s.jpg".to_string()),
                medium_image: None,
            }]
        );
    }
}
