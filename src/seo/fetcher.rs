//! Per-path SEO metadata retrieval.
//!
//! # Responsibilities
//! - Ask the metadata service for the head fragment of a request path
//! - Downgrade every failure to a deterministic fallback fragment
//! - Log why a fallback was used; never surface it to the caller
//!
//! # Design Decisions
//! - Single attempt per request, no retries, no caching
//! - Success means HTTP 200 with a non-empty body; the body is not validated
//! - Timeouts are whatever the shared client was built with

use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::{SiteConfig, UpstreamConfig};
use crate::observability::metrics;
use crate::seo::path::RequestPath;

/// Why the fallback fragment was used.
#[derive(Debug, Error)]
pub enum FallbackReason {
    #[error("metadata service returned {0}")]
    Status(StatusCode),

    #[error("metadata service returned an empty body")]
    EmptyBody,

    #[error("metadata request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result of one fetch attempt.
#[derive(Debug)]
pub enum FetchOutcome {
    Success(String),
    Fallback(FallbackReason),
}

/// Client for the metadata endpoint.
#[derive(Debug, Clone)]
pub struct MetadataFetcher {
    client: Client,
    endpoint: Url,
    site: SiteConfig,
}

impl MetadataFetcher {
    pub fn new(
        client: Client,
        upstream: &UpstreamConfig,
        site: SiteConfig,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            endpoint: upstream.metadata_url()?,
            site,
        })
    }

    /// Metadata URL for `path`, with the path URL-encoded into `?url=`.
    pub fn request_url(&self, path: &RequestPath) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", path.as_str());
        url
    }

    /// Resolve the head fragment for `path`. Never fails.
    pub async fn fetch(&self, path: &RequestPath) -> String {
        match self.try_fetch(path).await {
            FetchOutcome::Success(fragment) => {
                metrics::record_metadata_fetch("success");
                fragment
            }
            FetchOutcome::Fallback(reason) => {
                metrics::record_metadata_fetch("fallback");
                match &reason {
                    FallbackReason::Transport(_) => {
                        tracing::warn!(path = %path, error = %reason, "SEO metadata fetch failed, using fallback");
                    }
                    _ => {
                        tracing::info!(path = %path, reason = %reason, "SEO metadata unavailable, using fallback");
                    }
                }
                self.fallback_fragment(path)
            }
        }
    }

    /// One attempt against the metadata service, with the reason kept on failure.
    pub async fn try_fetch(&self, path: &RequestPath) -> FetchOutcome {
        let url = self.request_url(path);
        tracing::debug!(url = %url, "Fetching SEO metadata");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Fallback(e.into()),
        };

        let status = response.status();
        if status != StatusCode::OK {
            return FetchOutcome::Fallback(FallbackReason::Status(status));
        }

        match response.text().await {
            Ok(body) if body.is_empty() => FetchOutcome::Fallback(FallbackReason::EmptyBody),
            Ok(body) => FetchOutcome::Success(body),
            Err(e) => FetchOutcome::Fallback(e.into()),
        }
    }

    /// The locally defined fragment used when the service is unusable.
    pub fn fallback_fragment(&self, path: &RequestPath) -> String {
        fallback_fragment(&self.site, path)
    }
}

/// Default title, description and canonical link for `path`.
pub fn fallback_fragment(site: &SiteConfig, path: &RequestPath) -> String {
    format!(
        "\n<!-- Default SEO -->\n<title>{}</title>\n<meta name=\"description\" content=\"{}\" />\n<link rel=\"canonical\" href=\"{}{}\" />\n",
        site.default_title,
        site.default_description,
        site.origin,
        attribute_safe_path(path.as_str()),
    )
}

/// Percent-encode the characters that could end an attribute value or tag.
fn attribute_safe_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '"' => out.push_str("%22"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher_for(base_url: &str) -> MetadataFetcher {
        let upstream = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        MetadataFetcher::new(Client::new(), &upstream, SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_fallback_fragment_is_exact() {
        let fragment = fallback_fragment(&SiteConfig::default(), &RequestPath::new("/foo"));
        assert_eq!(
            fragment,
            "\n<!-- Default SEO -->\n<title>Your Site — Default Title</title>\n<meta name=\"description\" content=\"Default description\" />\n<link rel=\"canonical\" href=\"https://www.example.com/foo\" />\n"
        );
    }

    #[test]
    fn test_fallback_fragment_escapes_attribute_breakers() {
        let fragment = fallback_fragment(&SiteConfig::default(), &RequestPath::new("/a\"><b"));
        assert!(fragment.contains("href=\"https://www.example.com/a%22%3E%3Cb\""));
    }

    #[test]
    fn test_request_url_encodes_path() {
        let fetcher = fetcher_for("https://seo.example.com/api/");
        let url = fetcher.request_url(&RequestPath::new("/products/red shoes"));
        assert_eq!(url.path(), "/api/GetSeoMetaTags");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "url");
        assert_eq!(pairs[0].1, "/products/red shoes");
        assert!(url.as_str().contains("url=%2Fproducts%2Fred"));
    }

    #[tokio::test]
    async fn test_success_returns_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/GetSeoMetaTags"))
            .and(query_param("url", "/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Awesome Page</title>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server.uri());
        let fragment = fetcher.fetch(&RequestPath::new("/page")).await;
        assert_eq!(fragment, "<title>Awesome Page</title>");
    }

    #[tokio::test]
    async fn test_non_200_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("<title>Not this</title>"))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server.uri());
        let path = RequestPath::new("/missing");
        assert!(matches!(
            fetcher.try_fetch(&path).await,
            FetchOutcome::Fallback(FallbackReason::Status(StatusCode::NOT_FOUND))
        ));
        assert_eq!(fetcher.fetch(&path).await, fetcher.fallback_fragment(&path));
    }

    #[tokio::test]
    async fn test_other_success_codes_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server.uri());
        assert!(matches!(
            fetcher.try_fetch(&RequestPath::new("/")).await,
            FetchOutcome::Fallback(FallbackReason::Status(StatusCode::NO_CONTENT))
        ));
    }

    #[tokio::test]
    async fn test_empty_body_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let fetcher = fetcher_for(&server.uri());
        let path = RequestPath::new("/empty");
        assert!(matches!(
            fetcher.try_fetch(&path).await,
            FetchOutcome::Fallback(FallbackReason::EmptyBody)
        ));
        assert!(fetcher.fetch(&path).await.contains("href=\"https://www.example.com/empty\""));
    }

    #[tokio::test]
    async fn test_transport_error_falls_back() {
        // Bind then drop to get a port nothing listens on.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let fetcher = fetcher_for(&format!("http://{}", addr));
        let path = RequestPath::new("/foo");

        assert!(matches!(
            fetcher.try_fetch(&path).await,
            FetchOutcome::Fallback(FallbackReason::Transport(_))
        ));
        assert_eq!(
            fetcher.fetch(&path).await,
            fallback_fragment(&SiteConfig::default(), &path)
        );
    }
}
