//! Data route handler
//!
//! Runs one Notion query and answers with the product list or a JSON error.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::notion::{self, NotionError};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

/// Serve the product list as JSON
pub async fn serve_products(state: &AppState) -> Response<Full<Bytes>> {
    match notion::fetch_products(&state.config.notion, &state.http_client).await {
        Ok(products) => {
            logger::log_info(&format!("[Notion] Served {} product(s)", products.len()));
            http::build_json_response(StatusCode::OK, &products)
        }
        Err(err) => {
            log_failure(&err);
            http::build_json_response(err.status(), &err.to_body())
        }
    }
}

fn log_failure(err: &NotionError) {
    match err {
        NotionError::MissingConfig(_) => logger::log_warning(&format!("[Notion] {err}")),
        _ => logger::log_error(&format!("[Notion] {err}")),
    }
}
