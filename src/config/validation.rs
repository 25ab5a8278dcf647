//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that configured paths and prefixes are routable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: `{value}` is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("{field}: value is not a valid HTTP header value")]
    InvalidHeaderValue { field: &'static str },

    #[error("{field}: `{value}` must start with '/'")]
    NotAbsolutePath { field: &'static str, value: String },

    #[error("static_files: prefix `{0}` is mounted more than once")]
    DuplicateMount(String),

    #[error("static_files: directory for prefix `{0}` is empty")]
    EmptyDirectory(String),
}

/// Check a parsed configuration, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.cors.enabled {
        for (field, value) in [
            ("cors.allow_origin", &config.cors.allow_origin),
            ("cors.allow_methods", &config.cors.allow_methods),
            ("cors.allow_headers", &config.cors.allow_headers),
        ] {
            if HeaderValue::from_str(value).is_err() {
                errors.push(ValidationError::InvalidHeaderValue { field });
            }
        }
    }

    if config.health.enabled {
        check_path(&mut errors, "health.path", &config.health.path);
    }

    let mut seen = HashSet::new();
    for mount in &config.static_files {
        check_path(&mut errors, "static_files.prefix", &mount.prefix);
        if mount.directory.trim().is_empty() {
            errors.push(ValidationError::EmptyDirectory(mount.prefix.clone()));
        }
        if !seen.insert(mount.prefix.as_str()) {
            errors.push(ValidationError::DuplicateMount(mount.prefix.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_path(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if !value.starts_with('/') {
        errors.push(ValidationError::NotAbsolutePath {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StaticMountConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&RouterConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.cors.allow_headers = "bad\r\nheader".into();
        config.health.path = "health".into();
        config.static_files = vec![
            StaticMountConfig {
                prefix: "/assets".into(),
                directory: "./a".into(),
            },
            StaticMountConfig {
                prefix: "/assets".into(),
                directory: " ".into(),
            },
            StaticMountConfig {
                prefix: "".into(),
                directory: "./b".into(),
            },
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "not-an-address".into(),
                },
                ValidationError::ZeroTimeout,
                ValidationError::InvalidHeaderValue {
                    field: "cors.allow_headers"
                },
                ValidationError::NotAbsolutePath {
                    field: "health.path",
                    value: "health".into(),
                },
                ValidationError::EmptyDirectory("/assets".into()),
                ValidationError::DuplicateMount("/assets".into()),
                ValidationError::NotAbsolutePath {
                    field: "static_files.prefix",
                    value: "".into(),
                },
            ]
        );
    }

    #[test]
    fn test_disabled_sections_are_not_checked() {
        let mut config = RouterConfig::default();
        config.cors.enabled = false;
        config.cors.allow_origin = "bad\nvalue".into();
        config.health.enabled = false;
        config.health.path = String::new();
        config.observability.metrics_address = "nope".into();
        assert_eq!(validate_config(&config), Ok(()));
    }
}
