use std::fmt;

use serde::{Deserialize, Deserializer};

pub type RequestId = u64;

/// One page of the collection, in the API's own terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
    /// Ordering key such as `-published_at`.
    pub sort: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CollectionPage {
    pub data: Vec<ApiRecord>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiRecord {
    #[serde(deserialize_with = "lenient_u64")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub small_image: Vec<ImageVariant>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medium_image: Vec<ImageVariant>,
}

impl ApiRecord {
    pub fn small_image_url(&self) -> Option<&str> {
        self.small_image.first().map(|image| image.url.as_str())
    }

    pub fn medium_image_url(&self) -> Option<&str> {
        self.medium_image.first().map(|image| image.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageVariant {
    pub url: String,
}

/// Pagination block of the response. Numbers arrive either as JSON numbers
/// or as strings depending on how the query was echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    #[serde(deserialize_with = "lenient_u64")]
    pub total: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub last_page: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub current_page: u64,
    #[serde(deserialize_with = "lenient_u64")]
    pub per_page: u64,
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => Ok(value),
        NumberOrText::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected a number, got {text:?}"))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        request_id: RequestId,
        result: Result<CollectionPage, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not JSON or lacked `data`/`meta`.
    MalformedBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedBody => write!(f, "malformed response body"),
        }
    }
}
