//! Huntsman: a site spider
//!
//! This crate discovers every resource reachable from a seed URL on the seed's host,
//! reporting each resource's URL, status, kind, and size as it is found.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Huntsman operations
#[derive(Debug, Error)]
pub enum HuntsmanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed { url: String, source: UrlError },

    #[error("Crawl engine already started (state: {0})")]
    AlreadyStarted(state::EngineState),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Export error: {0}")]
    Export(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Huntsman operations
pub type Result<T> = std::result::Result<T, HuntsmanError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    Coordinator, CrawlOutcome, FetchError, FetchFailure, Fetcher, Resource, ResourceKind,
    ResourceStatus, RetryFetcher, StaticFetcher,
};
pub use state::{EngineState, VisitedRegistry};
