//! Data adapter errors
//!
//! Each variant knows the status code and JSON body the data route answers with.

use hyper::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotionError {
    /// A required secret is absent or empty; no upstream call was made
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    /// Upstream answered with a non-success status
    #[error("upstream returned status {status}")]
    Upstream { status: u16, details: Value },

    /// Upstream could not be reached or the body could not be read
    #[error("upstream unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered 2xx with a body that is not JSON
    #[error("invalid upstream response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl NotionError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingConfig(_) | Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(_) | Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// JSON body sent to the caller
    pub fn to_body(&self) -> Value {
        match self {
            Self::MissingConfig(_) => json!({ "error": "missing configuration" }),
            Self::Upstream { details, .. } => json!({
                "error": "upstream error",
                "details": details,
            }),
            Self::Transport(e) => json!({
                "error": "upstream unreachable",
                "details": error_chain(e),
            }),
            Self::InvalidResponse(e) => json!({
                "error": "invalid upstream response",
                "details": e.to_string(),
            }),
        }
    }
}

/// Error message followed by each underlying cause, `: `-separated
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
