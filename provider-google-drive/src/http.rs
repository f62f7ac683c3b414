//! HTTP client abstraction and reqwest implementation
//!
//! The connector talks to the Drive API through the [`HttpClient`] trait
//! so tests can substitute a mock. The production implementation wraps
//! `reqwest` with connection pooling and timeouts.

use crate::error::{GoogleDriveError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::time::Duration;

/// An HTTP request against the remote API.
///
/// Only GET semantics are needed: the Drive read path never writes.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Absolute request URL
    pub url: String,

    /// Request headers
    pub headers: HashMap<String, String>,

    /// Per-request timeout override
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Build a GET request with no extra headers.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An HTTP response from the remote API.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP transport used by the Drive connector.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Execute a GET request and return the full response body.
    ///
    /// A non-2xx status is returned as an `HttpResponse`, not an error;
    /// only transport failures map to [`GoogleDriveError::NetworkError`].
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Reqwest-based HTTP client implementation
///
/// Provides HTTP operations with:
/// - Connection pooling via reqwest
/// - TLS support by default
/// - Configurable timeouts
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new HTTP client with custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("drive-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client }
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self.client.get(&request.url);

        for (key, value) in request.headers {
            req = req.header(key, value);
        }
        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        let response = req
            .send()
            .await
            .map_err(|e| GoogleDriveError::NetworkError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| GoogleDriveError::NetworkError(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::get("https://example.com/api")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(request.url, "https://example.com/api");
        assert!(request.headers.is_empty());
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 204,
            body: Bytes::new(),
        };
        let not_found = HttpResponse {
            status: 404,
            body: Bytes::new(),
        };

        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }
}
