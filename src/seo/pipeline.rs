//! Per-request page rendering: metadata fetch + bundle read + injection.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::seo::fetcher::MetadataFetcher;
use crate::seo::injector::HeadInjector;
use crate::seo::path::RequestPath;
use crate::seo::redirect::RedirectDirective;

/// Failure to produce a page.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to read bundle document {path}: {source}")]
    BundleRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders the bundle document for one request path.
#[derive(Debug, Clone)]
pub struct SeoPipeline {
    fetcher: MetadataFetcher,
    injector: HeadInjector,
    bundle_path: PathBuf,
}

impl SeoPipeline {
    pub fn new(fetcher: MetadataFetcher, injector: HeadInjector, bundle_path: PathBuf) -> Self {
        Self {
            fetcher,
            injector,
            bundle_path,
        }
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Build the final document for `path`.
    ///
    /// The metadata fetch and the bundle read run concurrently. Only the
    /// bundle read can fail; metadata problems fall back silently. Invalid
    /// UTF-8 in the bundle is replaced, not rejected.
    pub async fn render(&self, path: &RequestPath) -> Result<String, PageError> {
        let (fragment, bundle) = tokio::join!(
            self.fetcher.fetch(path),
            tokio::fs::read(&self.bundle_path)
        );
        let bytes = bundle.map_err(|source| PageError::BundleRead {
            path: self.bundle_path.clone(),
            source,
        })?;
        let bundle = String::from_utf8_lossy(&bytes);

        let redirect = RedirectDirective::from_fragment(&fragment);
        if let Some(directive) = &redirect {
            tracing::debug!(path = %path, target = directive.target(), "Alternate link found, adding redirect script");
        }

        Ok(self.injector.inject(&bundle, &fragment, redirect.as_ref()))
    }
}
