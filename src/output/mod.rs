//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering result rows for the terminal
//! - Exporting results to CSV
//! - Summarizing a crawl as statistics

pub mod export;
pub mod stats;
pub mod table;

pub use export::{default_export_path, export_file_name, write_csv};
pub use stats::{print_statistics, CrawlStatistics};
pub use table::{format_header, format_row, format_size, matches_filter, size_label};

use thiserror::Error;

/// Errors raised while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;
