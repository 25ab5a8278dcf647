//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Accept connections and parse HTTP/1.1 and HTTP/2 via Axum
//! - Record the peer address (`ConnectInfo`) for the access log
//! - Wire up middleware (request ID, tracing, timeout)
//! - Hand every request to the routing engine
//! - Stop accepting and drain on shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RouterConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::routing::Router;

/// HTTP transport in front of a [`Router`].
pub struct HttpServer {
    app: axum::Router,
}

impl HttpServer {
    /// Create a new HTTP server that dispatches through `router`.
    pub fn new(config: &RouterConfig, router: Arc<Router>) -> Self {
        Self {
            app: Self::build_app(config, router),
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &RouterConfig, router: Arc<Router>) -> axum::Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);
        axum::Router::new()
            .fallback_service(router.into_service())
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request_id))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.app.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
