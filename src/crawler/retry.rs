//! Retry decorator for fetchers
//!
//! `RetryFetcher` wraps any `Fetcher` and is itself a `Fetcher`, so wrappers
//! compose. Only transport failures are retried; an HTTP 404 or 500 comes back
//! as a successful fetch and is returned as-is.

use crate::crawler::fetcher::{FetchFailure, Fetcher};
use crate::crawler::resource::Resource;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Retries failed fetches with linearly increasing backoff
///
/// # Retry Logic
///
/// | Attempt | Wait before it |
/// |---------|----------------|
/// | 1 | none |
/// | 2 | `backoff × 1` |
/// | 3 | `backoff × 2` |
/// | n + 1 | `backoff × n` |
///
/// After `retries` retries (`retries + 1` attempts) the last failure is
/// returned, including its partial resource. A cancellation during a wait
/// returns `FetchError::Cancelled` instead of the failure that caused the wait.
#[derive(Debug, Clone)]
pub struct RetryFetcher<F> {
    inner: F,
    retries: u32,
    backoff: Duration,
}

impl<F: Fetcher> RetryFetcher<F> {
    /// Creates a retrying wrapper
    ///
    /// # Arguments
    ///
    /// * `inner` - The fetcher to retry
    /// * `retries` - Maximum number of retries after the first attempt
    /// * `backoff` - Base wait, multiplied by the retry number
    pub fn new(inner: F, retries: u32, backoff: Duration) -> Self {
        Self {
            inner,
            retries,
            backoff,
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// The wait before retry number `retry` (1-based)
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff.saturating_mul(retry)
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for RetryFetcher<F> {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Resource, FetchFailure> {
        let mut retry = 0;

        loop {
            let failure = match self.inner.fetch(cancel, url).await {
                Ok(resource) => return Ok(resource),
                Err(failure) => failure,
            };

            if retry >= self.retries {
                if self.retries > 0 {
                    tracing::debug!("Giving up on {} after {} retries: {}", url, retry, failure);
                }
                return Err(failure);
            }

            retry += 1;
            let wait = self.backoff_for(retry);
            tracing::trace!(
                "Retry {}/{} for {} in {:?} ({})",
                retry,
                self.retries,
                url,
                wait,
                failure
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FetchFailure::cancelled()),
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }
}
