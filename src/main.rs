//! SEO Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http server ──▶ routing
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         ▼                       ▼                       ▼
//!    *.xml: sitemap       other extension:           everything else:
//!    proxy ──────────▶    static asset from          seo pipeline
//!    SEO service          the build dir              (fetch metadata ──▶ SEO service,
//!                                                     strip defaults, inject into head)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use seo_proxy::config::load_config;
use seo_proxy::lifecycle::signals::spawn_signal_listener;
use seo_proxy::observability::{logging, metrics};
use seo_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "seo-proxy")]
#[command(about = "Serves an SPA bundle with server-fetched SEO metadata", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the bundle build directory.
    #[arg(long)]
    build_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), |config| {
        if let Some(bind) = cli.bind {
            config.listener.bind_address = bind;
        }
        if let Some(dir) = cli.build_dir {
            config.bundle.build_dir = dir;
        }
    })?;

    logging::init(&config.observability.log_level);
    tracing::info!("seo-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        build_dir = %config.bundle.build_dir,
        upstream = %config.upstream.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        upstream_timeout_ms = config.upstream_timeout().as_millis() as u64,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
