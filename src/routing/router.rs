//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in priority order
//! - Classify a request path into the handler that serves it
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over a handful of matchers
//! - Pages are the explicit default, never a silent no-match

use crate::routing::matcher::{AssetMatcher, Matcher, SitemapMatcher};
use crate::seo::RequestPath;

/// What kind of handler serves a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Proxied to the SEO service's sitemap endpoint.
    Sitemap,
    /// Served from the build directory.
    Asset,
    /// The bundle document with injected metadata.
    Page,
}

impl RouteKind {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteKind::Sitemap => "sitemap",
            RouteKind::Asset => "asset",
            RouteKind::Page => "page",
        }
    }
}

#[derive(Debug)]
struct Route {
    kind: RouteKind,
    matcher: Box<dyn Matcher>,
}

/// Dispatch table for incoming paths.
#[derive(Debug)]
pub struct RequestRouter {
    routes: Vec<Route>,
}

impl RequestRouter {
    /// Build a router from `(kind, matcher)` pairs, checked in order.
    pub fn new(routes: Vec<(RouteKind, Box<dyn Matcher>)>) -> Self {
        Self {
            routes: routes
                .into_iter()
                .map(|(kind, matcher)| Route { kind, matcher })
                .collect(),
        }
    }

    /// Classify a path. Unmatched paths are pages.
    pub fn classify(&self, path: &RequestPath) -> RouteKind {
        self.routes
            .iter()
            .find(|route| route.matcher.matches(path))
            .map(|route| route.kind)
            .unwrap_or(RouteKind::Page)
    }
}

impl Default for RequestRouter {
    fn default() -> Self {
        Self::new(vec![
            (RouteKind::Sitemap, Box::new(SitemapMatcher) as Box<dyn Matcher>),
            (RouteKind::Asset, Box::new(AssetMatcher) as Box<dyn Matcher>),
        ])
    }
}
