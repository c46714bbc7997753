//! SEO head-injection proxy for single-page-application bundles.
//!
//! Serves a pre-built front-end bundle and rewrites its `<head>` per request
//! with metadata fetched from an external SEO service, proxying sitemap XML
//! from the same service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod seo;

pub use config::schema::SeoProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
