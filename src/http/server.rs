//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the dispatch handler
//! - Wire up middleware (request ID, tracing, timeout)
//! - Build the shared upstream client once
//! - Dispatch requests to sitemap proxy, static assets or the SEO pipeline
//! - Serve until the shutdown signal, draining in-flight requests

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceExt;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::SeoProxyConfig;
use crate::http::request::{request_id, RequestUuid};
use crate::http::sitemap::SitemapProxy;
use crate::observability::metrics;
use crate::routing::{RequestRouter, RouteKind};
use crate::seo::{HeadInjector, MetadataFetcher, RequestPath, SeoPipeline};

/// Error type for server construction.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid upstream endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<RequestRouter>,
    pub pipeline: Arc<SeoPipeline>,
    pub sitemaps: Arc<SitemapProxy>,
    pub assets: ServeDir,
}

/// HTTP server for the SEO proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<SeoProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: SeoProxyConfig) -> Result<Self, ServerError> {
        let client = Self::build_client(&config)?;

        let fetcher = MetadataFetcher::new(client.clone(), &config.upstream, config.site.clone())?;
        let bundle_path = PathBuf::from(&config.bundle.build_dir).join(&config.bundle.index_file);
        let pipeline = SeoPipeline::new(fetcher, HeadInjector::default(), bundle_path);
        let sitemaps = SitemapProxy::new(client, &config.upstream)?;

        let state = AppState {
            router: Arc::new(RequestRouter::default()),
            pipeline: Arc::new(pipeline),
            sitemaps: Arc::new(sitemaps),
            assets: ServeDir::new(&config.bundle.build_dir).append_index_html_on_directories(false),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    fn build_client(config: &SeoProxyConfig) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .user_agent(concat!("seo-proxy/", env!("CARGO_PKG_VERSION")))
            .timeout(config.upstream_timeout())
            .build()
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SeoProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(dispatch))
            .route("/{*path}", get(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(RequestUuid))
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            build_dir = %self.config.bundle.build_dir,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SeoProxyConfig {
        &self.config
    }
}

/// Entry point for every GET request.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let path = RequestPath::new(request.uri().path());
    let kind = state.router.classify(&path);

    tracing::debug!(path = %path, route = kind.as_str(), "Dispatching request");

    let response = match kind {
        RouteKind::Sitemap => serve_sitemap(&state, &path).await,
        RouteKind::Asset => serve_asset(&state, request).await,
        RouteKind::Page => serve_page(&state, &path).await,
    };

    metrics::record_request(kind.as_str(), response.status().as_u16(), start);
    response
}

async fn serve_sitemap(state: &AppState, path: &RequestPath) -> Response {
    match state.sitemaps.fetch(path).await {
        Ok(body) => ([(header::CONTENT_TYPE, "application/xml")], body).into_response(),
        Err(e) => {
            if e.is_not_found() {
                tracing::info!(path = %path, reason = %e, "Sitemap not found");
            } else {
                tracing::error!(path = %path, error = %e, "Sitemap error");
            }
            e.into_response()
        }
    }
}

async fn serve_asset(state: &AppState, request: Request<Body>) -> Response {
    let result: Result<_, Infallible> = state.assets.clone().oneshot(request).await;
    match result {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    }
}

async fn serve_page(state: &AppState, path: &RequestPath) -> Response {
    match state.pipeline.render(path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to render page");
            e.into_response()
        }
    }
}
