//! Catalogue core: pure paginated-query state machine and view-model helpers.
mod card;
mod effect;
mod msg;
mod pagination;
mod query;
mod state;
mod update;
mod view_model;

pub use card::{
    excerpt, format_date, resolve_image_url, strip_markup, CardSettings, DateLocale, DisplayCard,
    Record, DEFAULT_EXCERPT_LIMIT, PLACEHOLDER_IMAGE,
};
pub use effect::Effect;
pub use msg::{Msg, PageNav};
pub use pagination::{item_range, pager, pager_window, total_pages, ItemRange, PagerControls, PAGER_WINDOW};
pub use query::{
    merge_into_url, PageSize, QueryState, SortOrder, PAGE_PARAM, PER_PAGE_PARAM, SORT_PARAM,
};
pub use state::{CatalogueState, FetchPhase, FetchResult, PageData, RequestId};
pub use update::update;
pub use view_model::CatalogueViewModel;
