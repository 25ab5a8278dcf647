//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router and transport produce:
//!     → logging.rs (structured log events: access line, diagnostics)
//!     → metrics.rs (dispatch counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Diagnostics are side effects only; nothing here affects dispatch
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
