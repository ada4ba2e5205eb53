//! Resource records produced by fetchers
//!
//! A `Resource` is built once by a fetcher and handed to the engine by value.
//! Nothing downstream modifies it.

use std::fmt;

/// Outcome of fetching a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceStatus {
    /// The server answered; any code, including 404 and 5xx
    Http(u16),

    /// The request could not be completed (connect failure, timeout)
    Error,

    /// The response arrived but the body could not be read
    ReadError,
}

impl ResourceStatus {
    /// Returns true for the two transport failure tags
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error | Self::ReadError)
    }

    /// Returns the HTTP status code, if the server answered
    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Http(code) => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(code) => write!(f, "{}", code),
            Self::Error => f.write_str("Error"),
            Self::ReadError => f.write_str("Read Err"),
        }
    }
}

/// Classification of a resource by its Content-Type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Document,
    Stylesheet,
    Script,
    Font,
    Png,
    Gif,
    Jpeg,
    Svg,
    Icon,
    Manifest,
    Other,
    /// Used only for failed fetches
    NotApplicable,
}

impl ResourceKind {
    /// Classifies a Content-Type header value
    ///
    /// The first matching rule wins:
    ///
    /// | Content-Type contains | Kind |
    /// |-----------------------|------|
    /// | `text/html` | document |
    /// | `text/css` | stylesheet |
    /// | `javascript` | script |
    /// | `font` | font |
    /// | `image/png` | png |
    /// | `image/gif` | gif |
    /// | `image/jpeg` | jpeg |
    /// | `image/svg+xml` | svg+xml |
    /// | `x-icon`, `vnd.microsoft.icon` | x-icon |
    /// | `manifest+json` | manifest |
    /// | anything else | Other |
    ///
    /// # Examples
    ///
    /// ```
    /// use huntsman::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::from_content_type("text/html; charset=utf-8"), ResourceKind::Document);
    /// assert_eq!(ResourceKind::from_content_type("application/pdf"), ResourceKind::Other);
    /// ```
    pub fn from_content_type(content_type: &str) -> Self {
        let ct = content_type.to_ascii_lowercase();

        if ct.contains("text/html") {
            Self::Document
        } else if ct.contains("text/css") {
            Self::Stylesheet
        } else if ct.contains("javascript") {
            Self::Script
        } else if ct.contains("font") {
            Self::Font
        } else if ct.contains("image/png") {
            Self::Png
        } else if ct.contains("image/gif") {
            Self::Gif
        } else if ct.contains("image/jpeg") {
            Self::Jpeg
        } else if ct.contains("image/svg+xml") {
            Self::Svg
        } else if ct.contains("x-icon") || ct.contains("vnd.microsoft.icon") {
            Self::Icon
        } else if ct.contains("manifest+json") {
            Self::Manifest
        } else {
            Self::Other
        }
    }

    /// Returns true if resources of this kind may carry outgoing links
    pub fn is_document(&self) -> bool {
        matches!(self, Self::Document)
    }

    /// Returns the display label for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Stylesheet => "stylesheet",
            Self::Script => "script",
            Self::Font => "font",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Svg => "svg+xml",
            Self::Icon => "x-icon",
            Self::Manifest => "manifest",
            Self::Other => "Other",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fetched item and the links found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// Absolute URL, fragment stripped
    pub url: String,

    /// HTTP status or transport failure tag
    pub status: ResourceStatus,

    /// Content classification
    pub kind: ResourceKind,

    /// Payload length in bytes (0 for failures)
    pub size: u64,

    /// Absolute URLs discovered in this resource; empty unless `kind` is a document
    pub links: Vec<String>,

    /// Referrer URL, if the producer chose to attribute one
    pub from_source: Option<String>,
}

impl Resource {
    /// Builds a successfully fetched resource
    ///
    /// Links are discarded for non-document kinds.
    pub fn fetched(
        url: impl Into<String>,
        status_code: u16,
        kind: ResourceKind,
        size: u64,
        links: Vec<String>,
    ) -> Self {
        let links = if kind.is_document() { links } else { Vec::new() };
        Self {
            url: url.into(),
            status: ResourceStatus::Http(status_code),
            kind,
            size,
            links,
            from_source: None,
        }
    }

    /// Builds the partial resource reported for a failed fetch
    ///
    /// # Arguments
    ///
    /// * `url` - The URL that failed
    /// * `status` - `ResourceStatus::Error` or `ResourceStatus::ReadError`
    pub fn failed(url: impl Into<String>, status: ResourceStatus) -> Self {
        Self {
            url: url.into(),
            status,
            kind: ResourceKind::NotApplicable,
            size: 0,
            links: Vec::new(),
            from_source: None,
        }
    }

    /// Returns a copy attributed to the given referrer
    pub fn with_source(self, source: impl Into<String>) -> Self {
        Self {
            from_source: Some(source.into()),
            ..self
        }
    }

    /// Returns true if this resource records a transport failure
    pub fn is_failure(&self) -> bool {
        self.status.is_failure()
    }
}
