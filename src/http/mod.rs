//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request-id / trace / timeout layers)
//!     → routing (sitemap | asset | page)
//!         sitemap → sitemap.rs (SEO service passthrough)
//!         asset   → build directory
//!         page    → seo pipeline (fetch, strip, inject)
//!     → response.rs (error → status + body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;
pub mod sitemap;

pub use request::{RequestUuid, X_REQUEST_ID};
pub use server::{HttpServer, ServerError};
pub use sitemap::{SitemapError, SitemapProxy};
