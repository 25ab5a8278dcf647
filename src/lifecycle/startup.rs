//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the router from a validated configuration
//! - Register built-in handlers (health route, static mounts)
//! - Keep the live router in sync with reloaded configuration
//!
//! # Design Decisions
//! - Fail fast: an unusable configuration is a startup error
//! - A reload only replaces the CORS policy; routes stay as registered

use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

use axum::http::header::InvalidHeaderValue;

use crate::config::RouterConfig;
use crate::handlers::{health, StaticFiles};
use crate::http::middleware::cors::ConfiguredPolicy;
use crate::routing::{Route, Router};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid CORS header value: {0}")]
    Cors(#[from] InvalidHeaderValue),
}

/// Build a router with the configured CORS policy and built-in routes.
pub fn build_router(config: &RouterConfig) -> Result<Router, StartupError> {
    let policy = ConfiguredPolicy::from_config(&config.cors)?;
    let router = Router::with_cors_policy(policy);

    if config.health.enabled {
        router.register_route(Route::new(config.health.path.as_str()), health);
    }

    for mount in &config.static_files {
        router.register_prefix(
            mount.prefix.as_str(),
            StaticFiles::new(mount.prefix.as_str(), &mount.directory),
        );
        tracing::info!(
            prefix = %mount.prefix,
            directory = %mount.directory,
            "Static files mounted"
        );
    }

    Ok(router)
}

/// Apply reloaded configurations to the live router until shutdown.
pub async fn apply_reloads(
    router: std::sync::Arc<Router>,
    mut updates: mpsc::UnboundedReceiver<RouterConfig>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                match ConfiguredPolicy::from_config(&config.cors) {
                    Ok(policy) => router.set_cors_policy(policy),
                    Err(e) => tracing::error!(error = %e, "Reloaded CORS config rejected"),
                }
            }
            _ = shutdown.recv() => break,
        }
    }
}
