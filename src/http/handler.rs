//! The "handles a request" capability shared by exact routes and prefixes.
//!
//! Closures and `async fn`s taking a `Request<Body>` implement [`Handler`]
//! directly. Any `tower` service can be adapted with [`ServiceHandler`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes, HttpBody},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    BoxError,
};
use futures_util::future::BoxFuture;
use tower::{Service, ServiceExt};

/// A unit of behavior that consumes a request and produces a response.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response>;
}

/// Handler stored in the routing tables.
pub type SharedHandler = Arc<dyn Handler>;

impl<F, Fut, R> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let fut = self(request);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Adapts a `tower` service into a [`Handler`].
///
/// The service is cloned per request and driven with `oneshot`. Service
/// errors are logged and answered with 500.
#[derive(Clone)]
pub struct ServiceHandler<S> {
    service: S,
}

impl<S> ServiceHandler<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S> fmt::Debug for ServiceHandler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHandler")
            .field("service", &std::any::type_name::<S>())
            .finish()
    }
}

impl<S, B> Handler for ServiceHandler<S>
where
    S: Service<Request<Body>, Response = axum::http::Response<B>>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
    S::Error: fmt::Display + Send,
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    fn call(&self, request: Request<Body>) -> BoxFuture<'static, Response> {
        let service = self.service.clone();
        Box::pin(async move {
            match service.oneshot(request).await {
                Ok(response) => response.map(Body::new),
                Err(e) => {
                    tracing::error!(error = %e, "Wrapped service failed");
                    StatusCode::INTERNAL_SERVER_ERROR.into_response()
                }
            }
        })
    }
}
