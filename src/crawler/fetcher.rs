//! HTTP transport
//!
//! The crawl engine only needs one capability from the network: issue a GET
//! and hand back status, headers and body. This module defines that seam as
//! the `Transport` trait and provides the reqwest-backed implementation used
//! when the caller does not inject one.

use crate::config::HttpConfig;
use crate::CrawlError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// A fetched response
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Decoded response body
    pub body: String,
}

impl Response {
    /// Builds a response with a single Content-Type header
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        if let Ok(value) = content_type.parse::<HeaderValue>() {
            headers.insert(CONTENT_TYPE, value);
        }
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Content-Type header value, or an empty string if absent or not ASCII
    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    /// Returns true if the Content-Type header mentions `text/html`
    pub fn is_html(&self) -> bool {
        self.content_type().contains("text/html")
    }
}

/// Capability to GET a URL
///
/// Implementations must be usable from many tasks at once. Any error returned
/// aborts the whole crawl; a non-2xx status is not an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Response, CrawlError>;
}

/// Transport backed by a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport from HTTP settings
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sitemaps::config::HttpConfig;
    /// use sitemaps::crawler::HttpTransport;
    ///
    /// let transport = HttpTransport::new(&HttpConfig::default()).unwrap();
    /// ```
    pub fn new(config: &HttpConfig) -> Result<Self, CrawlError> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Response, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| classify_error(url, e))?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status.as_u16(), body.len());

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client settings
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

fn classify_error(url: &str, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
