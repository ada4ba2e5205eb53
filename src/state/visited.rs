//! Visited-URL registry
//!
//! The registry is the only place deduplication happens. `visit` is a single
//! check-and-set under one lock, so exactly one caller wins for any URL.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Concurrent set of URLs claimed during one crawl session
///
/// Entries are never evicted. A new session gets a new registry.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    urls: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `url` as visited
    ///
    /// Returns true only for the first call with a given URL, including when
    /// several callers race on the same value.
    pub fn visit(&self, url: &str) -> bool {
        let mut urls = self.lock();
        if urls.contains(url) {
            return false;
        }
        urls.insert(url.to_string())
    }

    /// Point-in-time membership check
    ///
    /// The answer may be stale by the time the caller acts on it; use `visit`
    /// to claim a URL.
    pub fn is_visited(&self, url: &str) -> bool {
        self.lock().contains(url)
    }

    /// Number of URLs recorded so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the set half-updated,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.urls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
