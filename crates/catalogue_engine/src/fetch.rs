use std::time::Duration;

use catalogue_logging::catalogue_debug;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use url::Url;

use crate::{CollectionPage, FailureKind, FetchError, PageRequest};

pub const DEFAULT_ENDPOINT: &str = "https://suitmedia-backend.suitdev.com/api/ideas";

/// Image variants the collection is asked to inline with every record.
const APPENDED_FIELDS: [&str; 2] = ["small_image", "medium_image"];

#[derive(Debug, Clone)]
pub struct CollectionSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait CollectionClient: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<CollectionPage, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCollectionClient {
    settings: CollectionSettings,
    client: reqwest::Client,
}

impl ReqwestCollectionClient {
    pub fn new(settings: CollectionSettings) -> Result<Self, FetchError> {
        Url::parse(&settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// `<endpoint>?page[number]=..&page[size]=..&append[]=..&sort=..`
    pub fn request_url(&self, request: &PageRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("page[number]", &request.page_number.to_string())
                .append_pair("page[size]", &request.page_size.to_string());
            for field in APPENDED_FIELDS {
                pairs.append_pair("append[]", field);
            }
            pairs.append_pair("sort", &request.sort);
        }
        Ok(url)
    }
}

#[async_trait::async_trait]
impl CollectionClient for ReqwestCollectionClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<CollectionPage, FetchError> {
        let url = self.request_url(request)?;
        catalogue_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        parse_collection_page(&body)
    }
}

/// Decodes a response body. Anything without `data` and `meta` is rejected.
pub fn parse_collection_page(body: &[u8]) -> Result<CollectionPage, FetchError> {
    serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
