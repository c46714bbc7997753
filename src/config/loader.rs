//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SeoProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Environment variable overriding the listener port.
pub const ENV_PORT: &str = "PORT";
/// Environment variable overriding `bundle.build_dir`.
pub const ENV_BUILD_DIR: &str = "SEO_PROXY_BUILD_DIR";
/// Environment variable overriding `upstream.base_url`.
pub const ENV_UPSTREAM: &str = "SEO_PROXY_UPSTREAM";

/// Parse configuration from a TOML file without validating it.
pub fn read_config(path: &Path) -> Result<SeoProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load configuration, apply process environment overrides, then `overrides`
/// (command-line flags), and validate the result.
///
/// With no path every field starts from its default.
pub fn load_config<F>(path: Option<&Path>, overrides: F) -> Result<SeoProxyConfig, ConfigError>
where
    F: FnOnce(&mut SeoProxyConfig),
{
    let config = match path {
        Some(path) => read_config(path)?,
        None => SeoProxyConfig::default(),
    };
    let mut config = apply_env_overrides(config, |key| std::env::var(key).ok());
    overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using the given lookup.
pub fn apply_env_overrides<F>(mut config: SeoProxyConfig, lookup: F) -> SeoProxyConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(port) = lookup(ENV_PORT).filter(|p| !p.is_empty()) {
        config.listener.bind_address = format!("0.0.0.0:{}", port);
    }
    if let Some(dir) = lookup(ENV_BUILD_DIR).filter(|d| !d.is_empty()) {
        config.bundle.build_dir = dir;
    }
    if let Some(base) = lookup(ENV_UPSTREAM).filter(|b| !b.is_empty()) {
        config.upstream.base_url = base;
    }
    config
}
