//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the SEO proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every default reproduces the fixed values the service has always shipped with.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the SEO proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SeoProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Location of the pre-built single-page-application bundle.
    pub bundle: BundleConfig,

    /// Site identity used by the fallback metadata.
    pub site: SiteConfig,

    /// Remote SEO / sitemap service.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl SeoProxyConfig {
    /// Deadline for every call to the SEO service.
    ///
    /// Without an explicit `upstream.timeout_secs` this is three quarters of
    /// the inbound request deadline, so a stalled service always ends in the
    /// fallback page rather than a request timeout.
    pub fn upstream_timeout(&self) -> Duration {
        match self.upstream.timeout_secs {
            Some(secs) => Duration::from_secs(secs),
            None => Duration::from_secs(self.timeouts.request_secs) * 3 / 4,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:6010").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:6010".to_string(),
        }
    }
}

/// Bundle (front-end build output) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Directory holding the built assets.
    pub build_dir: String,

    /// File name of the bundle document inside `build_dir`.
    pub index_file: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            build_dir: "build".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// Site identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin, without trailing slash (e.g., "https://www.example.com").
    pub origin: String,

    /// Title used when the metadata service is unusable.
    pub default_title: String,

    /// Description used when the metadata service is unusable.
    pub default_description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://www.example.com".to_string(),
            default_title: "Your Site — Default Title".to_string(),
            default_description: "Default description".to_string(),
        }
    }
}

/// Remote SEO service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the SEO service.
    pub base_url: String,

    /// Endpoint returning the head fragment for `?url=<path>`.
    pub metadata_endpoint: String,

    /// Endpoint returning sitemap XML for `?fileName=<name>`.
    pub sitemap_endpoint: String,

    /// Total timeout per upstream call. Must stay below `timeouts.request_secs`;
    /// absent = derived from the request deadline.
    pub timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://YOUR_SEO_API.example.com".to_string(),
            metadata_endpoint: "GetSeoMetaTags".to_string(),
            sitemap_endpoint: "GetFileContent".to_string(),
            timeout_secs: None,
        }
    }
}

impl UpstreamConfig {
    /// Full URL of the metadata endpoint.
    pub fn metadata_url(&self) -> Result<url::Url, url::ParseError> {
        self.endpoint_url(&self.metadata_endpoint)
    }

    /// Full URL of the sitemap endpoint.
    pub fn sitemap_url(&self) -> Result<url::Url, url::ParseError> {
        self.endpoint_url(&self.sitemap_endpoint)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        ))
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
