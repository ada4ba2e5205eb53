use crate::config::types::{Config, CrawlerConfig, FetchConfig};
use crate::ConfigError;

/// Largest accepted worker count
pub const MAX_CONCURRENCY: usize = 100;

/// Smallest frontier slots per worker
///
/// Workers block while pushing into a full frontier, and a worker blocked on a
/// push cannot pop. Below this ratio an ordinary page can fill the queue and
/// stall every worker.
pub const MIN_FRONTIER_PER_WORKER: usize = 100;

/// Largest accepted retry count
pub const MAX_RETRIES: u32 = 10;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates crawl engine configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    let min_frontier = config.concurrency * MIN_FRONTIER_PER_WORKER;
    if config.frontier_capacity < min_frontier {
        return Err(ConfigError::Validation(format!(
            "frontier-capacity must be >= {} for {} workers, got {}",
            min_frontier, config.concurrency, config.frontier_capacity
        )));
    }

    if config.results_capacity < 1 {
        return Err(ConfigError::Validation(
            "results-capacity must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.retries > MAX_RETRIES {
        return Err(ConfigError::Validation(format!(
            "retries must be at most {}, got {}",
            MAX_RETRIES, config.retries
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
