//! Sitemap passthrough to the SEO service.
//!
//! # Responsibilities
//! - Forward `/<name>.xml` to the sitemap endpoint as `?fileName=<name>.xml`
//! - Return the upstream body verbatim on HTTP 200 with a non-empty body
//!
//! # Design Decisions
//! - Any other status or an empty body is "not found" for the requester
//! - Transport failures are distinct from "not found" (500 vs 404)

use axum::body::Bytes;
use percent_encoding::percent_decode_str;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::seo::RequestPath;

/// Why a sitemap could not be served.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("sitemap service returned {0}")]
    Status(StatusCode),

    #[error("sitemap service returned an empty body")]
    EmptyBody,

    #[error("sitemap request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SitemapError {
    /// True when the requester should see "not found" rather than a server error.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, SitemapError::Transport(_))
    }
}

/// Client for the sitemap endpoint.
#[derive(Debug, Clone)]
pub struct SitemapProxy {
    client: Client,
    endpoint: Url,
}

impl SitemapProxy {
    pub fn new(client: Client, upstream: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Ok(Self {
            client,
            endpoint: upstream.sitemap_url()?,
        })
    }

    /// Sitemap URL for `path` (leading slash dropped).
    ///
    /// The path arrives percent-encoded; it is decoded first so the query
    /// carries the file name itself and not a second layer of escapes.
    pub fn request_url(&self, path: &RequestPath) -> Url {
        let file_name = percent_decode_str(path.without_leading_slash()).decode_utf8_lossy();
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("fileName", &file_name);
        url
    }

    /// Fetch the sitemap XML for `path`.
    pub async fn fetch(&self, path: &RequestPath) -> Result<Bytes, SitemapError> {
        let result = self.try_fetch(path).await;
        let outcome = match &result {
            Ok(_) => "found",
            Err(e) if e.is_not_found() => "not_found",
            Err(_) => "error",
        };
        metrics::record_sitemap_fetch(outcome);
        result
    }

    async fn try_fetch(&self, path: &RequestPath) -> Result<Bytes, SitemapError> {
        let url = self.request_url(path);
        tracing::debug!(url = %url, "Fetching sitemap");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(SitemapError::Status(status));
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(SitemapError::EmptyBody);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy_for(base_url: &str) -> SitemapProxy {
        let upstream = UpstreamConfig {
            base_url: base_url.to_string(),
            ..UpstreamConfig::default()
        };
        SitemapProxy::new(Client::new(), &upstream).unwrap()
    }

    #[test]
    fn test_request_url() {
        let proxy = proxy_for("https://seo.example.com");
        let url = proxy.request_url(&RequestPath::new("/sitemap-foo.xml"));
        assert_eq!(
            url.as_str(),
            "https://seo.example.com/GetFileContent?fileName=sitemap-foo.xml"
        );
    }

    #[test]
    fn test_request_url_decodes_escaped_path() {
        let proxy = proxy_for("https://seo.example.com");
        let url = proxy.request_url(&RequestPath::new("/sitemap%20a.xml"));
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "fileName");
        assert_eq!(pairs[0].1, "sitemap a.xml");
        assert!(!url.as_str().contains("%25"));
    }

    #[tokio::test]
    async fn test_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/GetFileContent"))
            .and(query_param("fileName", "sitemap-foo.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset/>"))
            .mount(&server)
            .await;

        let body = proxy_for(&server.uri())
            .fetch(&RequestPath::new("/sitemap-foo.xml"))
            .await
            .unwrap();
        assert_eq!(&body[..], b"<urlset/>");
    }

    #[tokio::test]
    async fn test_not_found_and_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("fileName", "missing.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(query_param("fileName", "empty.xml"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let proxy = proxy_for(&server.uri());
        let err = proxy.fetch(&RequestPath::new("/missing.xml")).await.unwrap_err();
        assert!(matches!(err, SitemapError::Status(StatusCode::NOT_FOUND)));
        assert!(err.is_not_found());

        let err = proxy.fetch(&RequestPath::new("/empty.xml")).await.unwrap_err();
        assert!(matches!(err, SitemapError::EmptyBody));
    }

    #[tokio::test]
    async fn test_transport_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let err = proxy_for(&format!("http://{}", addr))
            .fetch(&RequestPath::new("/sitemap.xml"))
            .await
            .unwrap_err();
        assert!(!err.is_not_found());
    }
}
