//! Mapping of handler failures to HTTP responses.
//!
//! # Design Decisions
//! - Bodies are short fixed strings; details go to the log, not the client
//! - Metadata failures never reach this module (they fall back silently)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::http::sitemap::SitemapError;
use crate::seo::PageError;

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl IntoResponse for SitemapError {
    fn into_response(self) -> Response {
        if self.is_not_found() {
            (StatusCode::NOT_FOUND, "Sitemap Not Found").into_response()
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load sitemap").into_response()
        }
    }
}
