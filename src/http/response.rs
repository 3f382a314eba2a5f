//! HTTP response building module
//!
//! Canned bodies go out as 200 with no explicit content type; hyper fills in
//! `content-length` from the full body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Body type of every response the fixture produces
pub type FixtureBody = Full<Bytes>;

/// Build 200 response carrying `body` verbatim
pub fn build_body_response(body: impl Into<Bytes>) -> Response<FixtureBody> {
    Response::builder()
        .status(StatusCode::OK)
        .body(Full::new(body.into()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 response with an explicit `text/plain` content type
pub fn build_plain_text_response(body: impl Into<Bytes>) -> Response<FixtureBody> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body(Full::new(body.into()))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response(message: &'static str) -> Response<FixtureBody> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(message.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            let mut resp = Response::new(Full::new(Bytes::from_static(message.as_bytes())));
            *resp.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            resp
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
