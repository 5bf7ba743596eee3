//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. There is no not-found branch:
//! any path other than the data route gets the wishlist page.

use crate::config::AppState;
use crate::handler::{page, products};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Path answered by the Notion data adapter
pub const DATA_ROUTE: &str = "/api/notion";

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let access_log = state.config.logging.access_log;
    let mut entry = access_log.then(|| {
        AccessLogEntry::from_request(
            remote_addr,
            req.method(),
            req.uri(),
            req.version(),
            req.headers(),
        )
    });

    let mut response = dispatch(req.method(), req.uri().path(), &state).await;

    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if let Some(entry) = entry.as_mut() {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Pick the response for a method and path
///
/// 1. `OPTIONS` on any path: CORS preflight
/// 2. [`DATA_ROUTE`] with any other method: Notion products as JSON
/// 3. Anything else: the wishlist page
pub async fn dispatch(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    if method == Method::OPTIONS {
        return http::build_options_response();
    }

    if path == DATA_ROUTE {
        return products::serve_products(state).await;
    }

    page::serve_page(method == Method::HEAD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::testing::{spawn_upstream, CannedResponse};
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use serde_json::{json, Value};

    fn state_for(base_url: &str, with_secrets: bool) -> AppState {
        let mut cfg = Config::default();
        cfg.notion.base_url = base_url.to_string();
        if with_secrets {
            cfg.notion.token = Some("secret_test".to_string());
            cfg.notion.database_id = Some("db123".to_string());
        }
        AppState::new(&cfg).unwrap()
    }

    async fn body_of(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    fn assert_cors(response: &Response<Full<Bytes>>) {
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET, POST, OPTIONS");
        assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    }

    #[tokio::test]
    async fn test_preflight_on_any_path() {
        let upstream = spawn_upstream(CannedResponse::json(200, json!({ "results": [] }))).await;
        let state = state_for(&upstream.base_url, true);

        for path in ["/", DATA_ROUTE, "/anything/else"] {
            let response = dispatch(&Method::OPTIONS, path, &state).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            assert!(body_of(response).await.is_empty());
        }
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_data_route_missing_configuration() {
        let upstream = spawn_upstream(CannedResponse::json(200, json!({ "results": [] }))).await;
        let state = state_for(&upstream.base_url, false);

        let response = dispatch(&Method::GET, DATA_ROUTE, &state).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body, json!({ "error": "missing configuration" }));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_data_route_success() {
        let upstream = spawn_upstream(CannedResponse::json(
            200,
            json!({
                "results": [{
                    "properties": {
                        "Name": { "rich_text": [{ "plain_text": "Lego Set" }] },
                        "Lien": { "url": "https://example.com" },
                        "Acheté": { "checkbox": true },
                        "image": { "files": [{ "external": { "url": "https://img.example.com/a.png" } }] }
                    }
                }]
            }),
        ))
        .await;
        let state = state_for(&upstream.base_url, true);

        let response = dispatch(&Method::GET, DATA_ROUTE, &state).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "application/json");
        assert_cors(&response);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(
            body,
            json!([{
                "title": "Lego Set",
                "url": "https://example.com",
                "bought": true,
                "note": "",
                "image": "https://img.example.com/a.png"
            }])
        );
    }

    #[tokio::test]
    async fn test_data_route_any_method() {
        let upstream = spawn_upstream(CannedResponse::json(200, json!({ "results": [] }))).await;
        let state = state_for(&upstream.base_url, true);

        let response = dispatch(&Method::POST, DATA_ROUTE, &state).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await.as_ref(), b"[]");
        assert_eq!(upstream.hits(), 1);
    }

    #[tokio::test]
    async fn test_data_route_upstream_rejection() {
        let payload = json!({ "object": "error", "status": 401, "code": "unauthorized" });
        let upstream = spawn_upstream(CannedResponse::json(401, payload.clone())).await;
        let state = state_for(&upstream.base_url, true);

        let response = dispatch(&Method::GET, DATA_ROUTE, &state).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body["error"], "upstream error");
        assert_eq!(body["details"], payload);
    }

    #[tokio::test]
    async fn test_data_route_unreachable_upstream() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let state = state_for(&format!("http://{addr}"), true);

        let response = dispatch(&Method::GET, DATA_ROUTE, &state).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_cors(&response);
        let body: Value = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(body["error"], "upstream unreachable");
        assert!(body["details"].is_string());
    }

    #[tokio::test]
    async fn test_other_paths_serve_page() {
        let upstream = spawn_upstream(CannedResponse::json(200, json!({ "results": [] }))).await;
        let state = state_for(&upstream.base_url, true);

        let mut bodies = Vec::new();
        for (method, path) in [
            (Method::GET, "/"),
            (Method::GET, "/wishlist"),
            (Method::POST, "/api/notion/extra"),
            (Method::DELETE, "/api"),
            (Method::GET, "/"),
        ] {
            let response = dispatch(&method, path, &state).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers()["content-type"],
                "text/html; charset=UTF-8"
            );
            assert_cors(&response);
            let body = body_of(response).await;
            assert!(!body.is_empty());
            bodies.push(body);
        }
        assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(upstream.hits(), 0);
    }

    #[tokio::test]
    async fn test_head_serves_page_headers_only() {
        let upstream = spawn_upstream(CannedResponse::json(200, json!({ "results": [] }))).await;
        let state = state_for(&upstream.base_url, true);

        let response = dispatch(&Method::HEAD, "/", &state).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-length"],
            page::render_page().len().to_string().as_str()
        );
        assert!(body_of(response).await.is_empty());
    }
}
