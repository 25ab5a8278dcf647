//! Middleware applied around dispatched handlers.

pub mod cors;

pub use cors::{ConfiguredPolicy, CorsHeaders, CorsPolicy, Passthrough};
