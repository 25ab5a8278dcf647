//! Minimal HTTP request router.
//!
//! Requests are matched against exact routes first, then prefix fallbacks,
//! and answered with `404 not found` when neither matches. The selected
//! handler runs wrapped in a replaceable CORS policy.

pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::{Handler, HttpServer};
pub use http::middleware::{CorsHeaders, CorsPolicy, Passthrough};
pub use lifecycle::Shutdown;
pub use routing::{Route, Router};
