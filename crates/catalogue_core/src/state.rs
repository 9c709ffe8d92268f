use catalogue_logging::{catalogue_debug, catalogue_info};

use crate::pagination::{item_range, pager, total_pages};
use crate::view_model::CatalogueViewModel;
use crate::{CardSettings, DisplayCard, PageSize, QueryState, Record, SortOrder};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What a successful collection fetch delivers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageData {
    pub records: Vec<Record>,
    pub total_items: u64,
}

/// Outcome of the most recent fetch. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchResult {
    pub phase: FetchPhase,
    /// Only meaningful in `FetchPhase::Success`.
    pub records: Vec<Record>,
    pub total_items: u64,
    pub total_pages: u32,
    pub error_message: Option<String>,
}

impl FetchResult {
    fn loading() -> Self {
        Self {
            phase: FetchPhase::Loading,
            ..Self::default()
        }
    }

    fn failed(message: String) -> Self {
        Self {
            phase: FetchPhase::Error,
            error_message: Some(message),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
    /// Response belonged to a superseded request and was dropped.
    Stale,
    Committed,
    /// Committed, and the page number had to be pulled back into range.
    Clamped,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogueState {
    query: QueryState,
    initialized: bool,
    /// Last known collection size; `None` until the first successful fetch.
    total_items: Option<u64>,
    fetch: FetchResult,
    awaiting: Option<RequestId>,
    last_request: RequestId,
    cards: CardSettings,
    dirty: bool,
}

impl CatalogueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card_settings(cards: CardSettings) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn fetch_result(&self) -> &FetchResult {
        &self.fetch
    }

    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        self.total_items
            .map_or(0, |items| total_pages(items, self.query.page_size))
    }

    /// Request whose response is currently expected, if any.
    pub fn awaiting_request(&self) -> Option<RequestId> {
        self.awaiting
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> CatalogueViewModel {
        let total_items = self.total_items.unwrap_or(0);
        let total_pages = self.total_pages();
        let cards = if self.fetch.phase == FetchPhase::Success {
            self.fetch
                .records
                .iter()
                .map(|record| DisplayCard::from_record(record, &self.cards))
                .collect()
        } else {
            Vec::new()
        };

        CatalogueViewModel {
            query: self.query,
            phase: self.fetch.phase,
            cards,
            total_items,
            total_pages,
            range: item_range(self.query.page, self.query.page_size, total_items),
            pager: pager(self.query.page, total_pages),
            show_pager: total_pages > 1,
            error_message: self.fetch.error_message.clone(),
            dirty: self.dirty,
        }
    }

    /// Seeds the query from the address bar. Only the first call counts; the
    /// page number is taken as-is until a response clamps it.
    pub(crate) fn initialize(&mut self, query: QueryState) -> bool {
        if self.initialized {
            return false;
        }
        self.initialized = true;
        self.query = query;
        self.dirty = true;
        true
    }

    pub(crate) fn set_sort(&mut self, sort: SortOrder) -> bool {
        if self.query.sort == sort {
            return false;
        }
        self.query.sort = sort;
        self.query.page = 1;
        self.dirty = true;
        true
    }

    pub(crate) fn set_page_size(&mut self, page_size: PageSize) -> bool {
        if self.query.page_size == page_size {
            return false;
        }
        self.query.page_size = page_size;
        self.query.page = 1;
        self.dirty = true;
        true
    }

    /// Rejects pages outside `[1, total_pages]` and the current page.
    pub(crate) fn set_page(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages() || page == self.query.page {
            return false;
        }
        self.query.page = page;
        self.dirty = true;
        true
    }

    pub(crate) fn can_retry(&self) -> bool {
        self.fetch.phase == FetchPhase::Error
    }

    /// Moves to `Loading` under a fresh request id. Any response still in
    /// flight becomes stale.
    pub(crate) fn begin_fetch(&mut self) -> RequestId {
        self.last_request += 1;
        self.awaiting = Some(self.last_request);
        self.fetch = FetchResult::loading();
        self.dirty = true;
        self.last_request
    }

    pub(crate) fn apply_loaded(
        &mut self,
        request_id: RequestId,
        result: Result<PageData, String>,
    ) -> LoadOutcome {
        if self.awaiting != Some(request_id) {
            catalogue_debug!(
                "Dropping stale response request_id={} awaiting={:?}",
                request_id,
                self.awaiting
            );
            return LoadOutcome::Stale;
        }
        self.awaiting = None;
        self.dirty = true;

        let page = match result {
            Ok(page) => page,
            Err(message) => {
                self.fetch = FetchResult::failed(message);
                return LoadOutcome::Committed;
            }
        };

        let pages = total_pages(page.total_items, self.query.page_size);
        self.total_items = Some(page.total_items);
        self.fetch = FetchResult {
            phase: FetchPhase::Success,
            records: page.records,
            total_items: page.total_items,
            total_pages: pages,
            error_message: None,
        };

        let max_page = pages.max(1);
        if self.query.page > max_page {
            catalogue_info!(
                "Clamping page {} to {} (total_items={})",
                self.query.page,
                max_page,
                page.total_items
            );
            self.query.page = max_page;
            return LoadOutcome::Clamped;
        }
        LoadOutcome::Committed
    }
}
