//! Request metadata helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for `x-request-id`
//! - Read the remote peer address recorded by the transport
//! - Read the assigned request ID for the access log

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderValue, Request},
};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for every request lacking an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Remote peer address, when the transport recorded one.
pub fn remote_addr(request: &Request<Body>) -> Option<SocketAddr> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

/// Request ID assigned by the request-id layer, if any.
pub fn request_id(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_request_uuid_is_unique() {
        let req = Request::new(());
        let mut maker = MakeRequestUuid;
        let a = maker.make_request_id(&req).unwrap();
        let b = maker.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
        assert_eq!(a.header_value().len(), 36);
    }

    #[test]
    fn test_remote_addr_from_connect_info() {
        let addr: SocketAddr = "10.1.2.3:4567".parse().unwrap();
        let mut req = Request::new(Body::empty());
        assert_eq!(remote_addr(&req), None);
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(remote_addr(&req), Some(addr));
    }

    #[test]
    fn test_request_id_from_header() {
        let req = Request::builder()
            .header(X_REQUEST_ID, "3f1c9a52-0d6e-4b8e-9a51-2f7c1d0e4b6a")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_id(&req), Some("3f1c9a52-0d6e-4b8e-9a51-2f7c1d0e4b6a"));
        assert_eq!(request_id(&Request::new(Body::empty())), None);
    }
}
