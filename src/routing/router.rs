//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store exact routes, prefix routes and the CORS policy
//! - Pick exactly one of: exact route, prefix route, not found
//! - Wrap the selected handler with the CORS policy and invoke it once
//!
//! # Design Decisions
//! - Tables live in an immutable [`RouteTable`] snapshot behind `ArcSwap`
//! - Every request loads one snapshot and keeps it until it finishes
//! - Registration is read-copy-update, safe while serving
//! - O(n) scans in registration order; first match wins
//! - Explicit not-found phase rather than a silent default handler

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use arc_swap::ArcSwap;
use axum::{body::Body, http::Request, response::Response};
use futures_util::future::BoxFuture;
use tower::Service;

use crate::http::handler::{Handler, SharedHandler};
use crate::http::middleware::cors::{CorsHeaders, CorsPolicy};
use crate::http::request::{remote_addr, request_id};
use crate::http::response::not_found;
use crate::observability::metrics;
use crate::routing::matcher::{Matcher, PathPrefixMatcher, Route};

/// An exact route and its handler.
#[derive(Clone)]
pub struct RouteEntry {
    pub route: Route,
    pub handler: SharedHandler,
}

/// A prefix fallback and its handler.
#[derive(Clone)]
pub struct PrefixEntry {
    pub matcher: PathPrefixMatcher,
    pub handler: SharedHandler,
}

/// Outcome of route lookup for one path.
pub enum Resolution<'a> {
    Exact(&'a RouteEntry),
    Prefix(&'a PrefixEntry),
    NotFound,
}

impl Resolution<'_> {
    /// Label used in logs and metrics.
    pub fn phase(&self) -> &'static str {
        match self {
            Resolution::Exact(_) => "exact",
            Resolution::Prefix(_) => "prefix",
            Resolution::NotFound => "not_found",
        }
    }
}

/// Immutable view of the routing tables used by a single dispatch.
#[derive(Clone)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
    prefixes: Vec<PrefixEntry>,
    cors: Arc<dyn CorsPolicy>,
}

impl RouteTable {
    fn new(cors: Arc<dyn CorsPolicy>) -> Self {
        Self {
            routes: Vec::new(),
            prefixes: Vec::new(),
            cors,
        }
    }

    /// Look up the handler for `path`: exact routes first, then prefixes.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if let Some(entry) = self.routes.iter().find(|e| e.route.matches(path)) {
            return Resolution::Exact(entry);
        }
        if let Some(entry) = self.prefixes.iter().find(|e| e.matcher.matches(path)) {
            return Resolution::Prefix(entry);
        }
        Resolution::NotFound
    }

    pub fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub fn prefixes(&self) -> &[PrefixEntry] {
        &self.prefixes
    }
}

/// HTTP request router.
///
/// Exact routes are checked before prefixes. A request matching neither gets
/// a 404 with body `not found` and never reaches a handler or the CORS
/// policy.
pub struct Router {
    table: ArcSwap<RouteTable>,
}

impl Router {
    /// Create an empty router with the allow-all CORS policy installed.
    pub fn new() -> Self {
        Self::with_cors_policy(CorsHeaders::allow_all())
    }

    /// Create an empty router with the given CORS policy.
    pub fn with_cors_policy<P: CorsPolicy>(policy: P) -> Self {
        let table = RouteTable::new(Arc::new(policy));
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    /// Register an exact route.
    ///
    /// Entries are never merged: registering a pattern that already exists
    /// adds a second entry that the earlier one shadows.
    pub fn register_route<H: Handler>(&self, route: impl Into<Route>, handler: H) {
        let route = route.into();
        let handler: SharedHandler = Arc::new(handler);

        let previous = self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            next.routes.push(RouteEntry {
                route: route.clone(),
                handler: handler.clone(),
            });
            next
        });

        if previous.routes.iter().any(|e| e.route == route) {
            tracing::warn!(
                pattern = %route,
                "Duplicate route pattern registered, earlier entry wins"
            );
        } else {
            tracing::debug!(pattern = %route, "Route registered");
        }
    }

    /// Register a prefix fallback.
    ///
    /// An empty prefix is rejected with a warning and leaves the table
    /// unchanged. Re-registering a prefix replaces its handler in place.
    pub fn register_prefix<H: Handler>(&self, prefix: impl Into<String>, handler: H) {
        let Some(matcher) = PathPrefixMatcher::new(prefix) else {
            tracing::warn!("Prefix was empty, not registered");
            return;
        };
        let handler: SharedHandler = Arc::new(handler);

        let previous = self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            match next.prefixes.iter_mut().find(|e| e.matcher == matcher) {
                Some(existing) => existing.handler = handler.clone(),
                None => next.prefixes.push(PrefixEntry {
                    matcher: matcher.clone(),
                    handler: handler.clone(),
                }),
            }
            next
        });

        let replaced = previous.prefixes.iter().any(|e| e.matcher == matcher);
        tracing::debug!(prefix = matcher.prefix(), replaced, "Prefix registered");
    }

    /// Replace the CORS policy for every dispatch that starts afterwards.
    pub fn set_cors_policy<P: CorsPolicy>(&self, policy: P) {
        let policy: Arc<dyn CorsPolicy> = Arc::new(policy);
        self.table.rcu(|current| {
            let mut next = RouteTable::clone(current);
            next.cors = policy.clone();
            next
        });
        tracing::info!("CORS policy replaced");
    }

    /// Current snapshot of the routing tables.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Serve one request.
    pub async fn dispatch(&self, request: Request<Body>) -> Response {
        let started = Instant::now();
        let table = self.table.load_full();
        let path = request.uri().path().to_owned();
        let method = request.method().clone();

        tracing::info!(
            method = %method,
            path = %path,
            remote = ?remote_addr(&request),
            request_id = ?request_id(&request),
            "Serving request"
        );

        let resolution = table.resolve(&path);
        let phase = resolution.phase();
        let handler = match resolution {
            Resolution::Exact(entry) => Some(entry.handler.clone()),
            Resolution::Prefix(entry) => Some(entry.handler.clone()),
            Resolution::NotFound => None,
        };

        let response = match handler {
            Some(handler) => table.cors.wrap(handler).call(request).await,
            None => {
                tracing::warn!(method = %method, path = %path, "Route had no handler set");
                not_found()
            }
        };

        metrics::record_dispatch(method.as_str(), phase, started);
        response
    }

    /// Turn a shared router into a `tower` service for a transport.
    pub fn into_service(self: Arc<Self>) -> RouterService {
        RouterService { router: self }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.table.load();
        let routes: Vec<&str> = table.routes.iter().map(|e| e.route.pattern()).collect();
        let prefixes: Vec<&str> = table.prefixes.iter().map(|e| e.matcher.prefix()).collect();
        f.debug_struct("Router")
            .field("routes", &routes)
            .field("prefixes", &prefixes)
            .finish()
    }
}

/// `tower::Service` view of a shared [`Router`].
#[derive(Clone, Debug)]
pub struct RouterService {
    router: Arc<Router>,
}

impl Service<Request<Body>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let router = self.router.clone();
        Box::pin(async move { Ok(router.dispatch(request).await) })
    }
}
