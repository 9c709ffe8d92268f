use crate::{QueryState, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Request one page from the collection; the answer comes back as
    /// `Msg::PageLoaded` carrying the same `request_id`.
    FetchPage {
        request_id: RequestId,
        query: QueryState,
    },
    /// Mirror the query into the address bar without adding a history entry.
    ReplaceUrl { query: QueryState },
}
