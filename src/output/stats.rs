//! Statistics gathered from crawl results
//!
//! This module provides functionality for summarizing the resources a
//! crawl produced and displaying that summary.

use crate::crawler::{Resource, ResourceKind};
use crate::output::table::size_label;
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Total number of resources reported
    pub total_resources: u64,

    /// Sum of all body sizes, in bytes
    pub total_bytes: u64,

    /// Count of resources by kind
    pub by_kind: HashMap<ResourceKind, u64>,

    /// Count of resources by status label ("200", "404", "Error", ...)
    pub by_status: HashMap<String, u64>,

    /// Resources whose fetch failed at the transport level
    pub failures: u64,

    /// Total number of links found across all documents
    pub total_links: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds statistics over a set of resources
    pub fn from_resources<'a>(resources: impl IntoIterator<Item = &'a Resource>) -> Self {
        let mut stats = Self::new();
        for resource in resources {
            stats.record(resource);
        }
        stats
    }

    /// Adds one resource to the totals
    pub fn record(&mut self, resource: &Resource) {
        self.total_resources += 1;
        self.total_bytes += resource.size;
        self.total_links += resource.links.len() as u64;
        *self.by_kind.entry(resource.kind).or_insert(0) += 1;
        *self.by_status.entry(resource.status.to_string()).or_insert(0) += 1;
        if resource.is_failure() {
            self.failures += 1;
        }
    }

    /// Percentage of resources that were fetched without a transport failure
    pub fn success_rate(&self) -> f64 {
        if self.total_resources == 0 {
            return 0.0;
        }
        let fetched = self.total_resources - self.failures;
        (fetched as f64 / self.total_resources as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Total resources: {}", stats.total_resources);
    println!("  Total size: {}", size_label(stats.total_bytes));
    println!("  Total links found: {}", stats.total_links);
    println!();

    println!("Resources by Type:");
    let mut kind_counts: Vec<_> = stats.by_kind.iter().collect();
    kind_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    for (kind, count) in kind_counts {
        let percentage = if stats.total_resources > 0 {
            (*count as f64 / stats.total_resources as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", kind, count, percentage);
    }
    println!();

    println!("Resources by Status:");
    let mut status_counts: Vec<_> = stats.by_status.iter().collect();
    status_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    for (status, count) in status_counts {
        println!("  {}: {}", status, count);
    }
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} resources fetched)",
        stats.success_rate(),
        stats.total_resources - stats.failures,
        stats.total_resources
    );
}
