//! Upstream database query
//!
//! Issues exactly one `POST /databases/<id>/query` per call. Nothing is
//! retried; every failure comes back as a [`NotionError`].

use hyper::body::Bytes;
use serde_json::Value;

use super::error::NotionError;
use super::product::{products_from_query, Product};
use crate::config::NotionConfig;
use crate::logger;

/// Token and database id, both present and non-empty
struct Credentials<'a> {
    token: &'a str,
    database_id: &'a str,
}

fn credentials(config: &NotionConfig) -> Result<Credentials<'_>, NotionError> {
    let token =
        non_empty(config.token.as_deref()).ok_or(NotionError::MissingConfig("notion.token"))?;
    let database_id = non_empty(config.database_id.as_deref())
        .ok_or(NotionError::MissingConfig("notion.database_id"))?;
    Ok(Credentials { token, database_id })
}

/// Whether both secrets are set, using the same rule as the data route
pub fn has_credentials(config: &NotionConfig) -> bool {
    credentials(config).is_ok()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Query endpoint for a database
pub fn query_url(base_url: &str, database_id: &str) -> String {
    format!(
        "{}/databases/{}/query",
        base_url.trim_end_matches('/'),
        database_id
    )
}

/// Query the configured database and flatten its pages into products
pub async fn fetch_products(
    config: &NotionConfig,
    client: &reqwest::Client,
) -> Result<Vec<Product>, NotionError> {
    let creds = credentials(config)?;
    let url = query_url(&config.base_url, creds.database_id);

    logger::log_debug(&format!("[Notion] POST {url}"));

    let response = client
        .post(&url)
        .bearer_auth(creds.token)
        .header("Notion-Version", &config.api_version)
        .json(&serde_json::json!({}))
        .send()
        .await
        .map_err(reqwest::Error::without_url)?;

    // The URL carries the database id, so it never reaches an error body
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(reqwest::Error::without_url)?;

    if !status.is_success() {
        return Err(NotionError::Upstream {
            status: status.as_u16(),
            details: upstream_details(&body),
        });
    }

    let payload: Value = serde_json::from_slice(&body)?;
    let products = products_from_query(&payload, &config.properties);
    logger::log_debug(&format!(
        "[Notion] {} page(s) mapped to products",
        products.len()
    ));
    Ok(products)
}

/// Upstream error payload: the JSON body when it parses, the raw text otherwise
fn upstream_details(body: &Bytes) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
