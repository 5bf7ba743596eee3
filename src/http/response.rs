//! HTTP response building module
//!
//! Builders for every response the server sends. All of them carry the CORS
//! headers; none of them panic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::{Response, StatusCode};
use serde::Serialize;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

pub const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Response builder with status and CORS headers set
fn cors_builder(status: StatusCode) -> Builder {
    Response::builder()
        .status(status)
        .header("Access-Control-Allow-Origin", CORS_ALLOW_ORIGIN)
        .header("Access-Control-Allow-Methods", CORS_ALLOW_METHODS)
        .header("Access-Control-Allow-Headers", CORS_ALLOW_HEADERS)
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    cors_builder(StatusCode::OK)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build HTML response from a static document
pub fn build_html_response(content: &'static str, is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(content.as_bytes())
    };

    cors_builder(StatusCode::OK)
        .header("Content-Type", HTML_CONTENT_TYPE)
        .header("Content-Length", content.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build JSON response
pub fn build_json_response<T: Serialize + ?Sized>(
    status: StatusCode,
    body: &T,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(j) => j,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return cors_builder(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", JSON_CONTENT_TYPE)
                .body(Full::new(Bytes::from_static(
                    br#"{"error":"internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    cors_builder(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
