//! HTTP protocol layer module
//!
//! Response builders shared by the router, decoupled from the Notion adapter.

pub mod response;

// Re-export commonly used types
pub use response::{build_html_response, build_json_response, build_options_response};
