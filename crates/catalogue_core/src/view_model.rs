use crate::{DisplayCard, FetchPhase, ItemRange, PagerControls, QueryState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueViewModel {
    pub query: QueryState,
    pub phase: FetchPhase,
    /// Empty unless `phase` is `Success`.
    pub cards: Vec<DisplayCard>,
    pub total_items: u64,
    pub total_pages: u32,
    pub range: ItemRange,
    pub pager: PagerControls,
    /// The pager is hidden when everything fits on one page.
    pub show_pager: bool,
    pub error_message: Option<String>,
    pub dirty: bool,
}

impl CatalogueViewModel {
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {}",
            self.range.start_item, self.range.end_item, self.total_items
        )
    }
}
