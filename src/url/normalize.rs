use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a discovered link into its canonical form
///
/// The only normalization applied on top of what the URL parser already does
/// (lowercased host, default port removal, dot-segment removal) is dropping
/// the fragment. Two links that differ only by `#section` map to the same page.
///
/// # Arguments
///
/// * `url_str` - An absolute URL string
///
/// # Returns
///
/// * `Ok(Url)` - The URL without its fragment
/// * `Err(UrlError)` - The string is not an absolute URL
///
/// # Examples
///
/// ```
/// use huntsman::url::canonicalize;
///
/// let url = canonicalize("http://example.com/page#top").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/page");
/// ```
pub fn canonicalize(url_str: &str) -> UrlResult<Url> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    url.set_fragment(None);
    Ok(url)
}

/// Parses a seed URL typed by an operator
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Input without an `http://` or `https://` prefix gets `https://` prepended
/// 3. The result must parse, be HTTP(S), and carry a host
/// 4. The fragment is removed
///
/// # Examples
///
/// ```
/// use huntsman::url::parse_seed;
///
/// let url = parse_seed("example.com/docs").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs");
/// ```
pub fn parse_seed(input: &str) -> UrlResult<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("empty URL".to_string()));
    }

    let with_scheme = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let url = canonicalize(&with_scheme)?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
