//! LINE Messaging API client implementation.

use std::time::Duration;

use emma_core::broadcast::{BroadcastError, BroadcastSink};
use emma_core::fetch::{ContentSource, FetchError};
use emma_core::media::{BroadcastMessage, MediaAsset, Variant};
use emma_shared::LineConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LineError;

/// Used when the provider omits a content type.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

const REQUEST_ID_HEADER: &str = "x-line-request-id";

/// Broadcast request body.
#[derive(Serialize)]
struct BroadcastRequest<'a> {
    messages: &'a [BroadcastMessage],
}

/// Bearer-authenticated client for the LINE Messaging API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct LineClient {
    http: Client,
    api_base: Url,
    data_api_base: Url,
    channel_access_token: String,
}

impl LineClient {
    /// Create a new client from configuration.
    ///
    /// Every request is bounded by `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the HTTP client cannot
    /// be built.
    pub fn new(config: &LineConfig) -> Result<Self, LineError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("emma/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_base: parse_base(&config.api_base_url)?,
            data_api_base: parse_base(&config.data_api_base_url)?,
            channel_access_token: config.channel_access_token.clone(),
        })
    }

    /// URL of a message's content, or of its preview.
    #[must_use]
    pub fn content_url(&self, message_id: &str, variant: Variant) -> Url {
        match variant {
            Variant::Original => endpoint(
                &self.data_api_base,
                &["v2", "bot", "message", message_id, "content"],
            ),
            Variant::Preview => endpoint(
                &self.data_api_base,
                &["v2", "bot", "message", message_id, "content", "preview"],
            ),
        }
    }

    /// URL of the broadcast endpoint.
    #[must_use]
    pub fn broadcast_url(&self) -> Url {
        endpoint(&self.api_base, &["v2", "bot", "message", "broadcast"])
    }
}

impl ContentSource for LineClient {
    async fn fetch(&self, message_id: &str, variant: Variant) -> Result<MediaAsset, FetchError> {
        let response = self
            .http
            .get(self.content_url(message_id, variant))
            .bearer_auth(&self.channel_access_token)
            .send()
            .await
            .map_err(|e| fetch_error(message_id, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                message_id,
                variant = variant.as_str(),
                status = status.as_u16(),
                "Content fetch rejected"
            );
            return Err(FetchError::status(message_id, status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_error(message_id, &e))?;

        debug!(
            message_id,
            variant = variant.as_str(),
            content_type = %content_type,
            size = bytes.len(),
            "Fetched message content"
        );

        Ok(MediaAsset::new(bytes, content_type))
    }
}

impl BroadcastSink for LineClient {
    async fn broadcast(&self, messages: &[BroadcastMessage]) -> Result<(), BroadcastError> {
        let response = self
            .http
            .post(self.broadcast_url())
            .bearer_auth(&self.channel_access_token)
            .json(&BroadcastRequest { messages })
            .send()
            .await
            .map_err(|e| broadcast_error(&e))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-")
            .to_string();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                request_id = %request_id,
                body = %body,
                "Broadcast rejected"
            );
            return Err(BroadcastError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(request_id = %request_id, count = messages.len(), "Broadcast accepted");
        Ok(())
    }
}

fn parse_base(raw: &str) -> Result<Url, LineError> {
    let url = Url::parse(raw).map_err(|e| LineError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(LineError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "cannot be a base URL".to_string(),
        });
    }
    Ok(url)
}

/// Append path segments, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // `parse_base` rejected cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn fetch_error(message_id: &str, err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::timeout(message_id)
    } else {
        FetchError::transport(err.to_string())
    }
}

fn broadcast_error(err: &reqwest::Error) -> BroadcastError {
    if err.is_timeout() {
        BroadcastError::Timeout
    } else {
        BroadcastError::Transport(err.to_string())
    }
}
