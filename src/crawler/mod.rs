//! Crawler module for resource fetching and crawl coordination
//!
//! This module contains the core crawling logic, including:
//! - The fetch contract and the plain HTTP fetcher
//! - HTML link extraction
//! - Retrying failed fetches with backoff
//! - The shared frontier and completion accounting
//! - The crawl engine that ties them together

mod coordinator;
mod fetcher;
mod parser;
mod resource;
mod retry;
mod scheduler;

pub use coordinator::{Coordinator, CrawlOutcome, ResultStream};
pub use fetcher::{build_http_client, FetchError, FetchFailure, Fetcher, StaticFetcher};
pub use parser::extract_links;
pub use resource::{Resource, ResourceKind, ResourceStatus};
pub use retry::RetryFetcher;
pub use scheduler::{Frontier, Job, PendingWork, WorkTicket};
