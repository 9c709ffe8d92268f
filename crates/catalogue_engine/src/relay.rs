//! Server-side image relay.
//!
//! Third-party image hosts reject hotlinked requests, so the display layer
//! loads remote images through `GET /api/image-proxy?url=...`, which fetches
//! the bytes with a fixed user agent and hands them back unchanged.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use catalogue_logging::{catalogue_debug, catalogue_error};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const RELAY_PATH: &str = "/api/image-proxy";
pub const RELAY_USER_AGENT: &str = "Mozilla/5.0 (compatible; Catalogue Image Relay)";
const CACHE_FOREVER: &str = "public, max-age=31536000";
const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(20),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("URL parameter is required")]
    MissingUrl,
    #[error("invalid image url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("upstream responded with status {0}")]
    UpstreamStatus(u16),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("image larger than {max_bytes} bytes")]
    TooLarge { max_bytes: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedImage {
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayQuery {
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ImageRelay {
    client: reqwest::Client,
    settings: RelaySettings,
}

impl ImageRelay {
    pub fn new(settings: RelaySettings) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .user_agent(RELAY_USER_AGENT)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    pub async fn fetch(&self, raw_url: Option<&str>) -> Result<RelayedImage, RelayError> {
        let raw_url = raw_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(RelayError::MissingUrl)?;
        let url = parse_remote_url(raw_url)?;
        catalogue_debug!("Relaying image {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::UpstreamStatus(status.as_u16()));
        }

        let max_bytes = self.settings.max_bytes;
        if response.content_length().is_some_and(|len| len > max_bytes) {
            return Err(RelayError::TooLarge { max_bytes });
        }
        let content_type = content_type_or_default(response.headers().get(header::CONTENT_TYPE));
        let bytes = response.bytes().await?;
        if bytes.len() as u64 > max_bytes {
            return Err(RelayError::TooLarge { max_bytes });
        }

        Ok(RelayedImage {
            content_type,
            bytes,
        })
    }
}

fn parse_remote_url(raw: &str) -> Result<Url, RelayError> {
    let url = Url::parse(raw).map_err(|err| RelayError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}

fn content_type_or_default(value: Option<&HeaderValue>) -> String {
    value
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_IMAGE_TYPE)
        .to_string()
}

pub fn relay_router(relay: ImageRelay) -> Router {
    Router::new()
        .route(RELAY_PATH, get(relay_image))
        .with_state(Arc::new(relay))
}

/// `400` without a `url`, `500` for any fetch failure.
pub async fn relay_image(
    State(relay): State<Arc<ImageRelay>>,
    Query(query): Query<RelayQuery>,
) -> Response {
    match relay.fetch(query.url.as_deref()).await {
        Ok(image) => (
            [
                (header::CONTENT_TYPE, image.content_type),
                (header::CACHE_CONTROL, CACHE_FOREVER.to_string()),
            ],
            image.bytes,
        )
            .into_response(),
        Err(RelayError::MissingUrl) => {
            (StatusCode::BAD_REQUEST, "URL parameter is required").into_response()
        }
        Err(err) => {
            catalogue_error!("Error proxying image: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error loading image").into_response()
        }
    }
}
