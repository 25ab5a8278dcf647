//! Serve a directory under a path prefix.
//!
//! The prefix is stripped from the request path before the file lookup, so
//! a mount of `./public` at `/static` answers `/static/app.js` with
//! `./public/app.js`. File serving itself is `tower_http`'s `ServeDir`.

use std::path::Path;

use axum::{
    body::Body,
    http::{uri::PathAndQuery, Request, Uri},
    response::Response,
};
use futures_util::future::BoxFuture;
use tower_http::services::ServeDir;

use crate::http::handler::{Handler, ServiceHandler};
use crate::http::response::not_found;

/// Prefix handler backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    prefix: String,
    files: ServiceHandler<ServeDir>,
}

impl StaticFiles {
    pub fn new(prefix: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        Self {
            prefix: prefix.into(),
            files: ServiceHandler::new(ServeDir::new(directory)),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Handler for StaticFiles {
    fn call(&self, mut request: Request<Body>) -> BoxFuture<'static, Response> {
        match strip_prefix(request.uri(), &self.prefix) {
            Some(uri) => {
                *request.uri_mut() = uri;
                self.files.call(request)
            }
            None => Box::pin(async { not_found() }),
        }
    }
}

/// Remove `prefix` from the path, keeping the query. The result always
/// starts with `/`.
///
/// The prefix must end on a segment boundary: a mount at `/static` owns
/// `/static` and `/static/...` but not `/staticx.txt`.
fn strip_prefix(uri: &Uri, prefix: &str) -> Option<Uri> {
    let rest = uri.path().strip_prefix(prefix)?;
    if !(rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/')) {
        return None;
    }
    let path = if rest.starts_with('/') {
        rest.to_owned()
    } else {
        format!("/{rest}")
    };
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_strip_prefix() {
        let uri: Uri = "/static/js/app.js?v=3".parse().unwrap();
        assert_eq!(strip_prefix(&uri, "/static").unwrap(), "/js/app.js?v=3");

        let uri: Uri = "/static".parse().unwrap();
        assert_eq!(strip_prefix(&uri, "/static").unwrap(), "/");

        let uri: Uri = "/assets/x".parse().unwrap();
        assert!(strip_prefix(&uri, "/static").is_none());
    }

    #[test]
    fn test_strip_prefix_stops_at_segment_boundary() {
        let uri: Uri = "/staticx.txt".parse().unwrap();
        assert!(strip_prefix(&uri, "/static").is_none());

        let uri: Uri = "/static/x.txt".parse().unwrap();
        assert_eq!(strip_prefix(&uri, "/static/").unwrap(), "/x.txt");
    }

    #[tokio::test]
    async fn test_sibling_path_outside_mount_is_404() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("x.txt"), "inside mount").unwrap();

        let handler = StaticFiles::new("/static", dir.path());
        let req = Request::builder()
            .uri("/staticx.txt")
            .body(Body::empty())
            .unwrap();
        let res = handler.call(req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"not found");
    }

    #[tokio::test]
    async fn test_serves_file_below_prefix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();

        let handler = StaticFiles::new("/static", dir.path());
        let req = Request::builder()
            .uri("/static/app.js")
            .body(Body::empty())
            .unwrap();
        let res = handler.call(req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"console.log(1);");
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let handler = StaticFiles::new("/static", dir.path());
        let req = Request::builder()
            .uri("/static/nope.css")
            .body(Body::empty())
            .unwrap();
        let res = handler.call(req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
