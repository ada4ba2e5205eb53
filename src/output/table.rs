//! Plain-text rendering of result rows

use crate::crawler::Resource;

/// Formats a byte count as kilobytes, e.g. `"1.5 kB"`
pub fn size_label(bytes: u64) -> String {
    format!("{:.1} kB", bytes as f64 / 1024.0)
}

/// Formats a byte count as kilobytes, right-aligned to 10 columns
///
/// # Example
///
/// ```
/// use huntsman::output::format_size;
///
/// assert_eq!(format_size(2048), "    2.0 kB");
/// ```
pub fn format_size(bytes: u64) -> String {
    format!("{:>10}", size_label(bytes))
}

/// Column header matching `format_row`
pub fn format_header() -> String {
    format!("{:<8} {:<10} {:>10}  {}", "Status", "Type", "Size", "URL")
}

/// One table row for a resource
pub fn format_row(resource: &Resource) -> String {
    format!(
        "{:<8} {:<10} {}  {}",
        resource.status.to_string(),
        resource.kind.as_str(),
        format_size(resource.size),
        resource.url
    )
}

/// Case-insensitive URL substring filter; an empty filter matches everything
pub fn matches_filter(resource: &Resource, filter: &str) -> bool {
    filter.is_empty() || resource.url.to_lowercase().contains(&filter.to_lowercase())
}
