//! Route matching logic.
//!
//! # Responsibilities
//! - Recognize sitemap requests (`*.xml`)
//! - Recognize static asset requests (final segment has an extension,
//!   a bare trailing dot included)
//!
//! # Design Decisions
//! - Extension matching is case-insensitive
//! - Only the final path segment is inspected (`/v1.2/page` is a page)
//! - No regex to guarantee O(n) matching

use crate::seo::RequestPath;

/// Trait for matching request paths against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &RequestPath) -> bool;
}

/// Matches sitemap files served by the SEO service.
#[derive(Debug, Clone, Default)]
pub struct SitemapMatcher;

impl Matcher for SitemapMatcher {
    fn matches(&self, path: &RequestPath) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
    }
}

/// Matches anything that looks like a file in the build output.
#[derive(Debug, Clone, Default)]
pub struct AssetMatcher;

impl Matcher for AssetMatcher {
    fn matches(&self, path: &RequestPath) -> bool {
        path.extension().is_some()
    }
}
