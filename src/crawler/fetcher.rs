//! Fetch contract and the plain HTTP fetcher
//!
//! This module defines what the crawl engine needs from a resource collector:
//! - The `Fetcher` trait: turn one URL into one `Resource`, or fail
//! - `FetchFailure`: a typed error that may carry a partial `Resource`
//! - `StaticFetcher`: GET the URL, classify it, extract links from HTML
//!
//! Fetchers hold no crawl state. Deduplication and scope decisions belong to
//! the engine, so any fetcher can be reused under a different scope policy.

use crate::config::FetchConfig;
use crate::crawler::parser::extract_links;
use crate::crawler::resource::{Resource, ResourceKind, ResourceStatus};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Reasons a fetch can fail at the transport level
///
/// HTTP error statuses are not failures; a 404 is a fetched resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Fetch cancelled")]
    Cancelled,

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Read { url: String, message: String },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

impl FetchError {
    /// Classifies a reqwest error raised while sending a request
    pub fn from_request(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// A failed fetch, optionally paired with the partial resource to report
///
/// When `partial` is present the caller must still emit it, so the failed URL
/// stays visible to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct FetchFailure {
    pub error: FetchError,
    pub partial: Option<Resource>,
}

impl FetchFailure {
    pub fn new(error: FetchError) -> Self {
        Self {
            error,
            partial: None,
        }
    }

    pub fn with_partial(error: FetchError, partial: Resource) -> Self {
        Self {
            error,
            partial: Some(partial),
        }
    }

    /// The failure reported when the cancellation token fires
    pub fn cancelled() -> Self {
        Self::new(FetchError::Cancelled)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.error, FetchError::Cancelled)
    }
}

/// Collects a single resource
///
/// Implementations must:
/// - return `FetchError::Cancelled` promptly once `cancel` fires
/// - return links only for document resources, absolute and without fragments
/// - leave scope filtering to the caller
/// - be callable from many tasks at once
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Resource, FetchFailure>;
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Arc<F> {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Resource, FetchFailure> {
        (**self).fetch(cancel, url).await
    }
}

#[async_trait]
impl<F: Fetcher + ?Sized> Fetcher for Box<F> {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Resource, FetchFailure> {
        (**self).fetch(cancel, url).await
    }
}

/// Builds an HTTP client from the fetch configuration
///
/// # Arguments
///
/// * `config` - The fetch configuration (timeout and user agent)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use huntsman::config::FetchConfig;
/// use huntsman::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher for plain HTTP resources
///
/// # Request Flow
///
/// 1. GET the URL (redirects followed by the client)
///    - Transport failure → partial resource with status `Error`
/// 2. Read the whole body
///    - Read failure → partial resource with status `Read Err`
/// 3. Classify by Content-Type
/// 4. For documents, extract links resolved against the requested URL
///
/// Every await races the cancellation token.
#[derive(Debug, Clone)]
pub struct StaticFetcher {
    client: Client,
}

impl StaticFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Resource, FetchFailure> {
        if cancel.is_cancelled() {
            return Err(FetchFailure::cancelled());
        }

        let target = Url::parse(url).map_err(|e| {
            FetchFailure::new(FetchError::InvalidUrl {
                url: url.to_string(),
                message: e.to_string(),
            })
        })?;

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchFailure::cancelled()),
            sent = self.client.get(target.clone()).send() => sent,
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request to {} failed: {}", url, e);
                return Err(FetchFailure::with_partial(
                    FetchError::from_request(url, &e),
                    Resource::failed(url, ResourceStatus::Error),
                ));
            }
        };

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FetchFailure::cancelled()),
            read = response.bytes() => read,
        };

        let body = match read {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Reading body of {} failed: {}", url, e);
                return Err(FetchFailure::with_partial(
                    FetchError::Read {
                        url: url.to_string(),
                        message: e.to_string(),
                    },
                    Resource::failed(url, ResourceStatus::ReadError),
                ));
            }
        };

        let kind = ResourceKind::from_content_type(&content_type);
        let links = if kind.is_document() {
            extract_links(&String::from_utf8_lossy(&body), &target)
        } else {
            Vec::new()
        };

        tracing::trace!(
            "Fetched {} ({}, {}, {} bytes, {} links)",
            url,
            status_code,
            kind,
            body.len(),
            links.len()
        );

        Ok(Resource::fetched(
            url,
            status_code,
            kind,
            body.len() as u64,
            links,
        ))
    }
}
