//! Forwarding of updates to the downstream handler.
//!
//! The raw request body is posted unchanged and the downstream status and
//! body are handed back so the web layer can mirror them.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderValue, StatusCode};
use reqwest::Client;
use tracing::info;

use crate::error::DownstreamError;

/// What the downstream handler answered.
#[derive(Debug, Clone)]
pub struct DownstreamResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

/// HTTP forwarder sharing a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct Downstream {
    inner: Arc<DownstreamInner>,
}

struct DownstreamInner {
    http: Client,
    url: String,
    timeout: Option<Duration>,
}

impl Downstream {
    /// Create a forwarder for the given endpoint.
    pub fn new(http: Client, url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self {
            inner: Arc::new(DownstreamInner {
                http,
                url: url.into(),
                timeout,
            }),
        }
    }

    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// POST `body` as JSON to the downstream endpoint.
    ///
    /// Any HTTP status is a successful forward; only transport failures and
    /// unreadable response bodies are errors.
    pub async fn forward(&self, body: Bytes) -> Result<DownstreamResponse, DownstreamError> {
        let body_length = body.len();

        let mut request = self
            .inner
            .http
            .post(self.inner.url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|source| DownstreamError::Transport {
                url: self.inner.url.clone(),
                source,
            })?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(DownstreamError::Body)?;

        info!(
            status_code = status.as_u16(),
            request_length = body_length,
            response_length = body.len(),
            "downstream_forwarded"
        );

        Ok(DownstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
