//! patriot-router
//!
//! Runs the router behind an Axum transport.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                    PATRIOT ROUTER                     │
//!                 │                                                       │
//!  Client Request │  ┌──────────┐    ┌──────────────────────────────┐    │
//!  ───────────────┼─▶│  http    │───▶│ routing::Router::dispatch     │    │
//!                 │  │ server   │    │  1. exact routes              │    │
//!                 │  └──────────┘    │  2. prefix fallbacks          │    │
//!                 │                  │  3. 404 "not found"           │    │
//!                 │                  └──────────────┬───────────────┘    │
//!                 │                                 ▼                     │
//!  Client Response│                  ┌──────────────────────────────┐    │
//!  ◀──────────────┼──────────────────│ CORS policy ∘ handler         │    │
//!                 │                  └──────────────────────────────┘    │
//!                 │                                                       │
//!                 │  config (TOML, hot reload) · observability · lifecycle│
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use patriot_router::config::{load_config, validate_config, watcher::ConfigWatcher, RouterConfig};
use patriot_router::lifecycle::{apply_reloads, build_router, signals, Shutdown};
use patriot_router::observability::{logging, metrics};
use patriot_router::HttpServer;

#[derive(Parser)]
#[command(name = "patriot-router")]
#[command(about = "Minimal HTTP request router with exact and prefix routes", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Reload the configuration file when it changes.
    #[arg(short, long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(|errors| {
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        })?;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("patriot-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        cors_enabled = config.cors.enabled,
        static_mounts = config.static_files.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let router = Arc::new(build_router(&config)?);
    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    // Keep the watcher handle alive for the lifetime of the server.
    let _watcher = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            tokio::spawn(apply_reloads(router.clone(), updates, shutdown.subscribe()));
            Some(handle)
        }
        _ => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(&config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
