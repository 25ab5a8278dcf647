//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatches by method and phase
//! - `router_dispatch_duration_seconds` (histogram): time from lookup to response, by phase
//!
//! Phase is one of `exact`, `prefix`, `not_found`.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished dispatch.
pub fn record_dispatch(method: &str, phase: &'static str, started: Instant) {
    metrics::counter!(
        "router_dispatch_total",
        "method" => method.to_owned(),
        "phase" => phase
    )
    .increment(1);
    metrics::histogram!("router_dispatch_duration_seconds", "phase" => phase)
        .record(started.elapsed().as_secs_f64());
}
