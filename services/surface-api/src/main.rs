//! Surface Layers API Server
//!
//! Sealed/unsealed land-cover layers and land surface temperature grids
//! for a square area around a point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use surface_api::config::ServiceConfig;
use surface_api::state::AppState;

/// Surface Layers API Server
#[derive(Parser, Debug)]
#[command(name = "surface-api")]
#[command(about = "Sealed/unsealed surface layers and land surface temperature server")]
struct Args {
    /// Listen address (overrides the config file)
    #[arg(short, long, env = "SURFACE_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// YAML configuration file
    #[arg(short, long, env = "SURFACE_CONFIG")]
    config: Option<PathBuf>,

    /// Number of worker threads
    #[arg(long, env = "SURFACE_WORKER_THREADS")]
    worker_threads: Option<usize>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let mut config = ServiceConfig::load(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.listen_addr = listen;
    }

    info!(
        overpass_mirrors = config.overpass.urls.len(),
        imagery = %config.imagery.base_url,
        band = %config.imagery.band,
        "Starting surface API server"
    );

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;

    let state = Arc::new(AppState::new(config, prometheus)?);
    let app = surface_api::build_router(state);

    info!("Surface API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
