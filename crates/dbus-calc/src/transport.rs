//! Transports carrying a request to the bridge
//!
//! A transport does one POST and hands back the raw status and body. It does
//! not retry, deduplicate or interpret the reply; that is the completion
//! callback's job.

use crate::core::{CalcError, CalcResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Content type of every request body
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw reply from the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Creates a response
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a JSON body to a path on the bridge
#[async_trait]
pub trait Transport: Send + Sync {
    /// POSTs `body` with `Content-Type: application/json`
    async fn post_json(&self, path: &str, body: String) -> CalcResult<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post_json(&self, path: &str, body: String) -> CalcResult<TransportResponse> {
        (**self).post_json(path, body).await
    }
}

/// reqwest-backed transport
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl HttpTransport {
    /// Creates a transport for `base_url`, with an optional request timeout
    pub fn new(base_url: &str, timeout: Option<std::time::Duration>) -> CalcResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(base_url, builder.build()?)
    }

    /// Creates a transport with a custom reqwest client
    pub fn with_client(base_url: &str, client: reqwest::Client) -> CalcResult<Self> {
        // Without a trailing slash, joining would replace the last segment
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = reqwest::Url::parse(&normalized)
            .map_err(|e| CalcError::InvalidEndpoint(format!("{base_url}: {e}")))?;
        Ok(Self { base_url, client })
    }

    /// Returns the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolves an endpoint path against the base URL
    pub fn url_for(&self, path: &str) -> CalcResult<reqwest::Url> {
        self.base_url
            .join(path)
            .map_err(|e| CalcError::InvalidEndpoint(format!("{path}: {e}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: String) -> CalcResult<TransportResponse> {
        let url = self.url_for(path)?;
        tracing::debug!(%url, "posting method call");

        let resp = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// A request captured by [`MockTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Endpoint path
    pub path: String,
    /// Body exactly as sent
    pub body: String,
}

/// Scripted transport for tests
///
/// Replies are handed out in the order they were queued; once the queue is
/// empty the default reply is used. Clones share the same script and log.
#[derive(Debug, Clone)]
pub struct MockTransport {
    script: Arc<Mutex<VecDeque<Result<TransportResponse, String>>>>,
    fallback: TransportResponse,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Creates a transport that answers 404 until scripted
    #[must_use]
    pub fn new() -> Self {
        Self::with_default(TransportResponse::new(404, ""))
    }

    /// Creates a transport that answers `fallback` once the script runs out
    #[must_use]
    pub fn with_default(fallback: TransportResponse) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a reply
    pub fn respond_with(&self, status: u16, body: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    /// Queues a network failure
    pub fn fail_with(&self, message: impl Into<String>) -> &Self {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Err(message.into()));
        self
    }

    /// Every request seen so far, oldest first
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests seen so far
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, path: &str, body: String) -> CalcResult<TransportResponse> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                path: path.to_string(),
                body,
            });

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        match next {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(message)) => Err(CalcError::Transport(message)),
            None => Ok(self.fallback.clone()),
        }
    }
}
