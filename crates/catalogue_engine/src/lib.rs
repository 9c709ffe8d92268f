//! Catalogue engine: collection fetching, background execution and the image relay.
mod engine;
mod fetch;
mod relay;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use fetch::{
    parse_collection_page, CollectionClient, CollectionSettings, ReqwestCollectionClient,
    DEFAULT_ENDPOINT,
};
pub use relay::{
    relay_image, relay_router, ImageRelay, RelayError, RelayQuery, RelaySettings, RelayedImage,
    RELAY_PATH, RELAY_USER_AGENT,
};
pub use types::{
    ApiRecord, CollectionPage, EngineEvent, FailureKind, FetchError, ImageVariant, PageMeta,
    PageRequest, RequestId,
};
