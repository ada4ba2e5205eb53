use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for Huntsman
///
/// Every section and field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Crawl engine configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of parallel workers
    pub concurrency: usize,

    /// Maximum number of queued URLs before discovery blocks
    ///
    /// Must be at least 100 per worker. Smaller queues can fill up with every
    /// worker blocked on a push and nobody left to pop.
    #[serde(rename = "frontier-capacity")]
    pub frontier_capacity: usize,

    /// Maximum number of unread results before workers block
    #[serde(rename = "results-capacity")]
    pub results_capacity: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            frontier_capacity: 10_000,
            results_capacity: 100,
        }
    }
}

/// Two workers per CPU, capped at 10
pub fn default_concurrency() -> usize {
    let cpus = std::thread::available_parallelism().map_or(1, |n| n.get());
    (cpus * 2).min(10)
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Retries after the first attempt; 0 disables retrying
    pub retries: u32,

    /// Base backoff between retries (milliseconds)
    #[serde(rename = "backoff-ms")]
    pub backoff_ms: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            retries: 0,
            backoff_ms: 500,
            user_agent: concat!("huntsman/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for CSV exports; the user's Downloads folder when unset
    #[serde(rename = "export-dir")]
    pub export_dir: Option<PathBuf>,
}
