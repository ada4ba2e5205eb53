//! CSV export of crawl results
//!
//! The export has one row per resource in the order given, with the header
//! `URL, Status, Type, Size`. A `From Source` column is appended only when at
//! least one resource records where it was discovered.

use crate::crawler::Resource;
use crate::output::table::size_label;
use crate::output::OutputResult;
use chrono::{DateTime, Local};
use directories::UserDirs;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes resources to a CSV file at `path`
///
/// # Arguments
///
/// * `path` - Destination file; created or truncated
/// * `resources` - Rows to write, in display order
///
/// # Returns
///
/// * `Ok(())` - The file was written and flushed
/// * `Err(OutputError)` - The file could not be created or written
pub fn write_csv(path: &Path, resources: &[Resource]) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let with_source = resources.iter().any(|r| r.from_source.is_some());

    let mut header = vec!["URL", "Status", "Type", "Size"];
    if with_source {
        header.push("From Source");
    }
    writer.write_record(&header)?;

    for resource in resources {
        let mut record = vec![
            resource.url.clone(),
            resource.status.to_string(),
            resource.kind.as_str().to_string(),
            size_label(resource.size),
        ];
        if with_source {
            record.push(resource.from_source.clone().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    tracing::info!("Exported {} resources to {}", resources.len(), path.display());
    Ok(())
}

/// Builds `YYYYMMDD_HHMMSS_<host>.csv` for a crawl of `seed` at time `at`
///
/// Dots and port separators in the host become dashes.
pub fn export_file_name(seed: &Url, at: DateTime<Local>) -> String {
    let host = match (seed.host_str(), seed.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        (None, _) => "export".to_string(),
    };
    let host = host.replace(['.', ':'], "-");
    format!("{}_{}.csv", at.format("%Y%m%d_%H%M%S"), host)
}

/// Chooses where an export of `seed` should be written
///
/// Uses `dir` when given; otherwise the user's Downloads folder, falling back
/// to the home directory and then the current directory.
pub fn default_export_path(dir: Option<&Path>, seed: &Url) -> PathBuf {
    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => default_export_dir(),
    };
    dir.join(export_file_name(seed, Local::now()))
}

fn default_export_dir() -> PathBuf {
    let Some(user_dirs) = UserDirs::new() else {
        return PathBuf::from(".");
    };

    match user_dirs.download_dir() {
        Some(downloads) if downloads.is_dir() => downloads.to_path_buf(),
        _ => user_dirs.home_dir().to_path_buf(),
    }
}
