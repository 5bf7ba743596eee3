// Application state module
// Immutable per-process state shared by every connection

use std::time::Duration;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Pooled client for upstream Notion calls
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.http.server_name.clone());
        if config.notion.timeout > 0 {
            builder = builder.timeout(Duration::from_secs(config.notion.timeout));
        }

        Ok(Self {
            config: config.clone(),
            http_client: builder.build()?,
        })
    }
}
