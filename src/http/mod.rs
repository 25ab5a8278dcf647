//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → routing::Router::dispatch (exact → prefix → not found)
//!     → middleware/cors.rs (wraps the selected handler)
//!     → handler.rs (the one handler that runs)
//!     → response.rs (router-owned responses such as 404)
//! ```

pub mod handler;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use handler::{Handler, ServiceHandler, SharedHandler};
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
