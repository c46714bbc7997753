//! Normalized request path.

use std::fmt;

/// A URL path that always begins with `/`.
///
/// Used verbatim as the lookup key for the metadata service and echoed into
/// the fallback canonical link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestPath(String);

impl RequestPath {
    /// Normalize a raw URI path, adding the leading slash when missing.
    pub fn new(raw: &str) -> Self {
        if raw.starts_with('/') {
            Self(raw.to_string())
        } else {
            Self(format!("/{}", raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The path with its single leading slash removed (`/sitemap.xml` → `sitemap.xml`).
    pub fn without_leading_slash(&self) -> &str {
        &self.0[1..]
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Extension of the final path segment, without the dot.
    ///
    /// A trailing dot counts as an empty extension (`/trailing.` → `""`);
    /// dotfiles and `..` have none.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        if name == ".." {
            return None;
        }
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RequestPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_leading_slash() {
        assert_eq!(RequestPath::new("").as_str(), "/");
        assert_eq!(RequestPath::new("foo").as_str(), "/foo");
        assert_eq!(RequestPath::new("/foo/bar").as_str(), "/foo/bar");
    }

    #[test]
    fn test_without_leading_slash() {
        assert_eq!(RequestPath::new("/sitemap-foo.xml").without_leading_slash(), "sitemap-foo.xml");
        assert_eq!(RequestPath::new("/").without_leading_slash(), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(RequestPath::new("/static/js/main.js").extension(), Some("js"));
        assert_eq!(RequestPath::new("/sitemap.xml").extension(), Some("xml"));
        assert_eq!(RequestPath::new("/products/shoes").extension(), None);
        assert_eq!(RequestPath::new("/v1.2/page").extension(), None);
        assert_eq!(RequestPath::new("/.well-known").extension(), None);
        assert_eq!(RequestPath::new("/trailing.").extension(), Some(""));
        assert_eq!(RequestPath::new("/a/..").extension(), None);
        assert_eq!(RequestPath::new("/").extension(), None);
    }
}
