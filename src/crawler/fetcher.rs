//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests with a bounded timeout
//! - Content-Type gating (only HTML is handed back)
//! - Error classification
//!
//! Fetching never fails from the caller's point of view: every failure path is
//! folded into the returned [`FetchResult`] so the engine can record it as data.

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Content types accepted as HTML
const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Why a fetch did not produce HTML
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the timeout
    #[error("Request timeout")]
    Timeout,

    /// DNS failure, refused connection, TLS failure
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other transport-level failure, including body read errors
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a status of 400 or above
    #[error("HTTP {0}")]
    Http(u16),

    /// The response was not an HTML document
    #[error("Unsupported content type: {0}")]
    ContentType(String),
}

/// Result of a fetch operation
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Successfully fetched an HTML page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The fetch did not yield HTML
    Failure {
        /// HTTP status code, when a response was received
        status_code: Option<u16>,
        /// The classified failure
        error: FetchError,
    },
}

impl FetchResult {
    /// Builds a failure result
    pub fn failure(status_code: Option<u16>, error: FetchError) -> Self {
        Self::Failure { status_code, error }
    }

    /// Returns the HTTP status code, if a response was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Success { status_code, .. } => Some(*status_code),
            Self::Failure { status_code, .. } => *status_code,
        }
    }

    /// Returns the page body for successful fetches
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success { body, .. } => Some(body),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the failure message, if any
    pub fn error_message(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error.to_string()),
        }
    }
}

/// Anything that can fetch a page for the crawl engine
///
/// Implementations must never panic on network failures; every outcome is a
/// [`FetchResult`].
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a single URL
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Fetcher backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Creates a fetcher with the given identity and per-request timeout
    pub fn new(user_agent: &UserAgentConfig, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = build_http_client(user_agent, timeout)?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        fetch_url(&self.client, url, self.timeout).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total time allowed for each request
///
/// # Example
///
/// ```no_run
/// use recipe_scout::config::UserAgentConfig;
/// use recipe_scout::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | DNS / connect / TLS failure | `Connect`, no status |
/// | Timeout | `Timeout`, no status |
/// | HTTP status >= 400 | `Http(code)`, status kept |
/// | Content-Type present and not HTML | `ContentType`, status kept |
/// | Body read failure | `Transport`, status kept |
/// | Otherwise | `Success` |
///
/// Nothing is retried.
pub async fn fetch_url(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => return FetchResult::failure(None, classify_transport_error(&e)),
    };

    let status_code = response.status().as_u16();
    let final_url = response.url().to_string();

    if is_error_status(status_code) {
        return FetchResult::failure(Some(status_code), FetchError::Http(status_code));
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    if let Some(content_type) = content_type {
        if !is_html_content_type(&content_type) {
            return FetchResult::failure(Some(status_code), FetchError::ContentType(content_type));
        }
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code,
            body,
        },
        Err(e) => FetchResult::failure(Some(status_code), classify_transport_error(&e)),
    }
}

/// Returns true for any status of 400 or above, including non-standard codes
pub fn is_error_status(status_code: u16) -> bool {
    status_code >= 400
}

/// Returns true if a Content-Type header value names an HTML document
pub fn is_html_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    HTML_CONTENT_TYPES.contains(&essence.as_str())
}

fn classify_transport_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e.to_string())
    } else {
        FetchError::Transport(e.to_string())
    }
}
