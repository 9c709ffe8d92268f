use crate::{PageData, PageSize, QueryState, RequestId, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Query read from the address bar on first activation.
    Initialized(QueryState),
    /// User picked a sort order.
    SortChanged(SortOrder),
    /// User picked a page size.
    PageSizeChanged(PageSize),
    /// User clicked a page number.
    PageRequested(u32),
    /// User clicked one of the first/previous/next/last controls.
    Navigate(PageNav),
    /// User asked to re-run a failed fetch.
    RetryClicked,
    /// Collection response for an earlier `Effect::FetchPage`.
    PageLoaded {
        request_id: RequestId,
        result: Result<PageData, String>,
    },
    /// Input that maps to no action.
    NoOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
}

impl PageNav {
    /// Page this control points at, or `None` if it points before page 1.
    pub fn target(self, current: u32, total_pages: u32) -> Option<u32> {
        match self {
            PageNav::First => Some(1),
            PageNav::Previous => current.checked_sub(1),
            PageNav::Next => current.checked_add(1),
            PageNav::Last => Some(total_pages),
        }
    }
}
