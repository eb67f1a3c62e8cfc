//! Queimadas relay server
//!
//! Proxies INPE wildfire hotspot files and relays burn scar analyses.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use hotspot_api::{create_router, AppState, RelayConfig};

/// Queimadas relay server
#[derive(Parser, Debug)]
#[command(name = "hotspot-api")]
#[command(about = "INPE wildfire hotspot proxy and burn scar analysis relay")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8080", env = "LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Relay configuration file (YAML)
    #[arg(short, long, default_value = "config/queimadas.yaml", env = "QUEIMADAS_CONFIG")]
    config: PathBuf,

    /// Directory holding the front end (index.html)
    #[arg(long, default_value = "static", env = "STATIC_DIR")]
    static_dir: PathBuf,

    /// Burn scar backend base URL (overrides the config file)
    #[arg(long, env = "BURN_SCAR_BACKEND_URL")]
    backend_url: Option<String>,

    /// Number of worker threads
    #[arg(long, env = "WORKER_THREADS")]
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

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting queimadas relay");

    let mut config = RelayConfig::load(&args.config)?;
    if let Some(url) = args.backend_url {
        config.backend.endpoint = Some(url);
    }

    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state, prometheus_handle, &args.static_dir);

    // Parse listen address
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    info!(address = %addr, static_dir = %args.static_dir.display(), "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
