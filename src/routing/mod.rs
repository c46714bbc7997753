//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: RouteKind (Sitemap | Asset | Page)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (suffix/extension checks only)
//! - Deterministic: same input always matches same route
//! - First match wins; anything unmatched is a page

pub mod matcher;
pub mod router;

pub use matcher::{AssetMatcher, Matcher, SitemapMatcher};
pub use router::{RequestRouter, RouteKind};
