//! HTML link extraction
//!
//! Every resource reference in a document is reported, not just navigation
//! links, so stylesheets, scripts, and media show up in the crawl too.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Elements that reference other resources
const LINK_SELECTOR: &str =
    "a[href], link[href], img[src], script[src], video[src], audio[src], source[src]";

/// Extracts every referenced resource from an HTML document
///
/// # Extraction Rules
///
/// | Element | Attribute |
/// |---------|-----------|
/// | `<a>`, `<link>` | `href` |
/// | `<img>`, `<script>`, `<video>`, `<audio>`, `<source>` | `src` |
///
/// - Values are resolved against `base_url`
/// - Fragments are stripped from the resolved URL
/// - Values that fail to resolve, or resolve to non-HTTP(S) schemes
///   (`javascript:`, `mailto:`, `data:`), are skipped
/// - No host filtering is applied
/// - Document order is preserved and duplicates are kept
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the document was fetched from
///
/// # Example
///
/// ```
/// use huntsman::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/docs#intro">Docs</a><img src="logo.png">"#;
/// let base = Url::parse("https://example.com/index.html").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links, vec!["https://example.com/docs", "https://example.com/logo.png"]);
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    let Ok(selector) = Selector::parse(LINK_SELECTOR) else {
        return links;
    };

    for element in document.select(&selector) {
        if let Some(value) = reference_of(&element) {
            if let Some(absolute_url) = resolve_link(value, base_url) {
                links.push(absolute_url);
            }
        }
    }

    links
}

/// Returns the attribute value an element uses to reference a resource
fn reference_of<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    let attr = match element.value().name() {
        "a" | "link" => "href",
        _ => "src",
    };
    element.value().attr(attr)
}

/// Resolves a reference to an absolute URL without fragment
///
/// Returns None if the reference is empty, malformed, or not HTTP(S).
fn resolve_link(value: &str, base_url: &Url) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut absolute_url = base_url.join(value).ok()?;
    if absolute_url.scheme() != "http" && absolute_url.scheme() != "https" {
        return None;
    }

    absolute_url.set_fragment(None);
    Some(absolute_url.into())
}
