//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every field
//! has a default, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::http::middleware::cors::{
    DEFAULT_ALLOW_HEADERS, DEFAULT_ALLOW_METHODS, DEFAULT_ALLOW_ORIGIN,
};

/// Root configuration for the router process.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Cross-origin policy applied to dispatched handlers.
    pub cors: CorsConfig,

    /// Built-in health route.
    pub health: HealthConfig,

    /// Directories served under a path prefix.
    pub static_files: Vec<StaticMountConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// CORS configuration. Defaults reproduce the allow-all policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// When false, handlers run without any CORS headers added.
    pub enabled: bool,

    /// Value of `Access-Control-Allow-Origin`.
    pub allow_origin: String,

    /// Value of `Access-Control-Allow-Methods`.
    pub allow_methods: String,

    /// Value of `Access-Control-Allow-Headers`.
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_origin: DEFAULT_ALLOW_ORIGIN.to_string(),
            allow_methods: DEFAULT_ALLOW_METHODS.to_string(),
            allow_headers: DEFAULT_ALLOW_HEADERS.to_string(),
        }
    }
}

/// Health route configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HealthConfig {
    /// Register the health route.
    pub enabled: bool,

    /// Exact path of the health route.
    pub path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/health".to_string(),
        }
    }
}

/// A directory served under a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StaticMountConfig {
    /// Path prefix, stripped before the file lookup (e.g., "/static").
    pub prefix: String,

    /// Directory on disk.
    pub directory: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human format.
    pub json_logs: bool,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config, RouterConfig::default());
        assert!(config.cors.enabled);
        assert_eq!(config.health.path, "/health");
        assert!(config.static_files.is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config: RouterConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [cors]
            allow_origin = "https://app.example.com"

            [[static_files]]
            prefix = "/static"
            directory = "./public"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.cors.allow_origin, "https://app.example.com");
        assert_eq!(config.cors.allow_methods, DEFAULT_ALLOW_METHODS);
        assert_eq!(config.static_files.len(), 1);
        assert_eq!(config.static_files[0].directory, "./public");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
