//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs before anything binds or connects
//! - Validate value ranges (timeouts > 0, upstream deadline inside the request deadline)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SeoProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SeoProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{field} must be an http(s) URL, got '{value}'")]
    Url { field: &'static str, value: String },

    #[error("site.origin must not end with '/'")]
    OriginTrailingSlash,

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("bundle.index_file must be a plain file name, got '{0}'")]
    IndexFile(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("upstream.timeout_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    UpstreamTimeout { upstream: u64, request: u64 },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &SeoProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    check_http_url("site.origin", &config.site.origin, &mut errors);
    if config.site.origin.ends_with('/') {
        errors.push(ValidationError::OriginTrailingSlash);
    }
    check_http_url("upstream.base_url", &config.upstream.base_url, &mut errors);

    if config.bundle.build_dir.is_empty() {
        errors.push(ValidationError::Empty("bundle.build_dir"));
    }
    let index = &config.bundle.index_file;
    if index.is_empty() {
        errors.push(ValidationError::Empty("bundle.index_file"));
    } else if index.contains('/') || index.contains('\\') || index == ".." {
        errors.push(ValidationError::IndexFile(index.clone()));
    }

    if config.upstream.metadata_endpoint.is_empty() {
        errors.push(ValidationError::Empty("upstream.metadata_endpoint"));
    }
    if config.upstream.sitemap_endpoint.is_empty() {
        errors.push(ValidationError::Empty("upstream.sitemap_endpoint"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }
    match config.upstream.timeout_secs {
        Some(0) => errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs")),
        Some(upstream) if upstream >= config.timeouts.request_secs => {
            errors.push(ValidationError::UpstreamTimeout {
                upstream,
                request: config.timeouts.request_secs,
            });
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let ok = Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false);
    if !ok {
        errors.push(ValidationError::Url {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&SeoProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = SeoProxyConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.site.origin = "https://www.example.com/".into();
        config.upstream.base_url = "ftp://seo.example.com".into();
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::OriginTrailingSlash));
        assert!(errors.contains(&ValidationError::ZeroTimeout("timeouts.request_secs")));
    }

    #[test]
    fn test_rejects_nested_index_file() {
        let mut config = SeoProxyConfig::default();
        config.bundle.index_file = "../index.html".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::IndexFile("../index.html".into())]);
    }

    #[test]
    fn test_rejects_zero_upstream_timeout() {
        let mut config = SeoProxyConfig::default();
        config.upstream.timeout_secs = Some(0);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroTimeout("upstream.timeout_secs")]);
    }

    #[test]
    fn test_rejects_upstream_timeout_not_below_request_deadline() {
        let mut config = SeoProxyConfig::default();
        config.timeouts.request_secs = 10;

        config.upstream.timeout_secs = Some(10);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UpstreamTimeout {
                upstream: 10,
                request: 10
            }]
        );

        config.upstream.timeout_secs = Some(9);
        assert!(validate_config(&config).is_ok());
    }
}
