//! mpop-api - movie popularity backend
//!
//! Fetches per-year demographic data and movie counts from the upstream
//! APIs, fuses them by year, and serves the result to the charting UI.

use anyhow::Result;
use clap::Parser;
use mpop_common::config::ConfigResolver;
use mpop_common::CodeTables;
use mpop_api::services::{FetchLimits, TmdbClient, UnPopulationClient};
use mpop_api::{build_router, cors_layer, AppState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "mpop-api", version, about = "Movie popularity backend")]
struct Args {
    /// Path to TOML config file (overrides MPOP_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so its log level can apply
    let resolver = ConfigResolver::new(args.config);
    let mut config = resolver.load()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!(
        "Starting mpop-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!("Configuration source: {:?}", resolver.source());

    if config.un_api_key.is_none() {
        info!("No UN API key configured, requests will be sent unauthenticated");
    }
    if config.tmdb_api_key.is_none() {
        info!("No TMDB API key configured, movie counts will likely be 0");
    }

    let timeout = Duration::from_secs(config.request_timeout_secs);
    let un_client = UnPopulationClient::new(&config.un_api_url, config.un_api_key.clone(), timeout)?;
    let tmdb_client = TmdbClient::new(&config.tmdb_api_url, config.tmdb_api_key.clone(), timeout)?;

    let limits = FetchLimits {
        max_in_flight: config.max_concurrent_requests,
        max_years: config.max_year_span,
    };
    info!(
        "Upstream limits: {} concurrent requests per source, {} years per query",
        limits.max_in_flight, limits.max_years
    );

    let state = AppState::new(CodeTables::builtin(), Arc::new(un_client), Arc::new(tmdb_client))
        .with_limits(limits);
    let app = build_router(state).layer(cors_layer(&config.allowed_origin)?);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("mpop-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
