use url::Url;

/// Returns the scope boundary string for a URL
///
/// The boundary is the host plus any explicit port, so `http://127.0.0.1:8080/`
/// and `http://127.0.0.1:9090/` are different scopes. Default ports are dropped
/// by the parser and never appear here.
///
/// # Arguments
///
/// * `url` - The URL to extract the scope from
///
/// # Returns
///
/// * `Some(String)` - The host, with `:port` appended when one is explicit
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use huntsman::url::scope_of;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(scope_of(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:3000/").unwrap();
/// assert_eq!(scope_of(&url), Some("localhost:3000".to_string()));
/// ```
pub fn scope_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Returns true if `url` lies inside the given scope boundary
///
/// Matching is exact: subdomains and other ports are out of scope.
pub fn in_scope(url: &Url, boundary: &str) -> bool {
    scope_of(url).as_deref() == Some(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_of_simple_host() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(scope_of(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_scope_of_keeps_explicit_port() {
        let url = Url::parse("http://127.0.0.1:4567/page").unwrap();
        assert_eq!(scope_of(&url), Some("127.0.0.1:4567".to_string()));
    }

    #[test]
    fn test_scope_of_drops_default_port() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(scope_of(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_scope_of_lowercases_host() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(scope_of(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_scope_of_without_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(scope_of(&url), None);
    }

    #[test]
    fn test_in_scope_exact_host_only() {
        let page = Url::parse("http://example.com/a").unwrap();
        let sub = Url::parse("http://blog.example.com/a").unwrap();
        let other = Url::parse("http://other.com/c").unwrap();

        assert!(in_scope(&page, "example.com"));
        assert!(!in_scope(&sub, "example.com"));
        assert!(!in_scope(&other, "example.com"));
    }

    #[test]
    fn test_in_scope_ignores_scheme() {
        let https = Url::parse("https://example.com/a").unwrap();
        assert!(in_scope(&https, "example.com"));
    }
}
