//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use seo_proxy::config::SeoProxyConfig;
use seo_proxy::{HttpServer, Shutdown};
use tokio::net::TcpListener;

#[allow(dead_code)]
pub const CRA_INDEX: &str = r#"<!doctype html><html lang="en"><head><meta charset="utf-8"/><meta name="description" content="Web site created using create-react-app"/><meta property="og:title" content="CRA"/><link rel="stylesheet" href="/static/css/main.css"/><title>CRA App</title></head><body><div id="root"></div></body></html>"#;

/// Write the bundle document into `dir`.
#[allow(dead_code)]
pub fn write_bundle(dir: &Path, html: &str) {
    std::fs::write(dir.join("index.html"), html).unwrap();
}

/// Configuration pointing at a temporary build dir and a mock upstream.
pub fn test_config(build_dir: &Path, upstream: &str) -> SeoProxyConfig {
    let mut config = SeoProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.bundle.build_dir = build_dir.to_string_lossy().into_owned();
    config.upstream.base_url = upstream.to_string();
    config
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub fn closed_port_url() -> String {
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    format!("http://{}", addr)
}

/// Start the proxy on an ephemeral port. Dropping the returned `Shutdown`
/// is fine; the server then runs until the test runtime ends.
pub async fn spawn_server(config: SeoProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
