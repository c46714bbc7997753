//! Metrics collection and exposition.
//!
//! # Metrics
//! - `seo_proxy_requests_total` (counter): requests by route kind, status
//! - `seo_proxy_request_duration_seconds` (histogram): latency by route kind
//! - `seo_proxy_metadata_fetch_total` (counter): `success` / `fallback`
//! - `seo_proxy_sitemap_fetch_total` (counter): `found` / `not_found` / `error`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "seo_proxy_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("seo_proxy_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a metadata fetch.
pub fn record_metadata_fetch(outcome: &'static str) {
    metrics::counter!("seo_proxy_metadata_fetch_total", "outcome" => outcome).increment(1);
}

/// Record the outcome of a sitemap fetch.
pub fn record_sitemap_fetch(outcome: &'static str) {
    metrics::counter!("seo_proxy_sitemap_fetch_total", "outcome" => outcome).increment(1);
}
