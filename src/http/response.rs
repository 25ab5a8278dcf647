//! Responses the router writes on its own.
//!
//! # Design Decisions
//! - The miss response carries no content-type header
//! - Body is the literal `not found`, no trailing newline

use axum::{
    body::Body,
    http::StatusCode,
    response::Response,
};

/// Body written when neither an exact route nor a prefix matched.
pub const NOT_FOUND_BODY: &str = "not found";

/// Build the terminal 404 response.
pub fn not_found() -> Response {
    let mut response = Response::new(Body::from(NOT_FOUND_BODY));
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
