//! Cross-origin policy applied to the selected handler before dispatch.
//!
//! A [`CorsPolicy`] is a transform `wrap(handler) -> handler`. The router
//! holds exactly one policy and swaps it wholesale; policies never chain.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{
        header::{
            InvalidHeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderMap, HeaderValue, Request,
    },
    response::Response,
};
use futures_util::future::BoxFuture;

use crate::config::CorsConfig;
use crate::http::handler::{Handler, SharedHandler};

pub const DEFAULT_ALLOW_ORIGIN: &str = "*";
pub const DEFAULT_ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";
pub const DEFAULT_ALLOW_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Process-wide transform applied to whichever handler dispatch selects.
pub trait CorsPolicy: Send + Sync + 'static {
    fn wrap(&self, handler: SharedHandler) -> SharedHandler;
}

impl<F> CorsPolicy for F
where
    F: Fn(SharedHandler) -> SharedHandler + Send + Sync + 'static,
{
    fn wrap(&self, handler: SharedHandler) -> SharedHandler {
        self(handler)
    }
}

/// Identity policy: the handler runs untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl CorsPolicy for Passthrough {
    fn wrap(&self, handler: SharedHandler) -> SharedHandler {
        handler
    }
}

/// Sets the three `Access-Control-Allow-*` headers, then runs the handler.
///
/// There is no preflight short-circuit and no origin validation. The headers
/// count as written before the handler runs, so a value the handler sets for
/// the same header wins.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
    allow_methods: HeaderValue,
    allow_headers: HeaderValue,
}

impl CorsHeaders {
    /// The permissive default installed by `Router::new()`.
    pub fn allow_all() -> Self {
        Self {
            allow_origin: HeaderValue::from_static(DEFAULT_ALLOW_ORIGIN),
            allow_methods: HeaderValue::from_static(DEFAULT_ALLOW_METHODS),
            allow_headers: HeaderValue::from_static(DEFAULT_ALLOW_HEADERS),
        }
    }

    pub fn new(
        allow_origin: &str,
        allow_methods: &str,
        allow_headers: &str,
    ) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            allow_origin: HeaderValue::from_str(allow_origin)?,
            allow_methods: HeaderValue::from_str(allow_methods)?,
            allow_headers: HeaderValue::from_str(allow_headers)?,
        })
    }

    fn apply(&self, headers: &mut HeaderMap) {
        headers
            .entry(ACCESS_CONTROL_ALLOW_ORIGIN)
            .or_insert_with(|| self.allow_origin.clone());
        headers
            .entry(ACCESS_CONTROL_ALLOW_METHODS)
            .or_insert_with(|| self.allow_methods.clone());
        headers
            .entry(ACCESS_CONTROL_ALLOW_HEADERS)
            .or_insert_with(|| self.allow_headers.clone());
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self::allow_all()
    }
}

impl CorsPolicy for CorsHeaders {
    fn wrap(&self, handler: SharedHandler) -> SharedHandler {
        Arc::new(WithCorsHeaders {
            headers: Arc::new(self.clone()),
            inner: handler,
        })
    }
}

struct WithCorsHeaders {
    headers: Arc<CorsHeaders>,
    inner: SharedHandler,
}

impl Handler for WithCorsHeaders {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let headers = self.headers.clone();
        let fut = self.inner.call(request);
        Box::pin(async move {
            let mut response = fut.await;
            headers.apply(response.headers_mut());
            response
        })
    }
}

/// Policy selected by the `[cors]` config section.
#[derive(Debug, Clone)]
pub enum ConfiguredPolicy {
    Headers(CorsHeaders),
    Disabled(Passthrough),
}

impl ConfiguredPolicy {
    pub fn from_config(config: &CorsConfig) -> Result<Self, InvalidHeaderValue> {
        if !config.enabled {
            return Ok(Self::Disabled(Passthrough));
        }
        let headers = CorsHeaders::new(
            &config.allow_origin,
            &config.allow_methods,
            &config.allow_headers,
        )?;
        Ok(Self::Headers(headers))
    }
}

impl CorsPolicy for ConfiguredPolicy {
    fn wrap(&self, handler: SharedHandler) -> SharedHandler {
        match self {
            Self::Headers(h) => h.wrap(handler),
            Self::Disabled(p) => p.wrap(handler),
        }
    }
}
