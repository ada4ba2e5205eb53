//! Configuration module for Huntsman
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use huntsman::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("huntsman.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{default_concurrency, Config, CrawlerConfig, FetchConfig, OutputConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_CONCURRENCY, MAX_RETRIES, MIN_FRONTIER_PER_WORKER};
