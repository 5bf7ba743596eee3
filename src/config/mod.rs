// Configuration module entry point
// Loads layered configuration and exposes the per-process application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LogLevel, LoggingConfig, NotionConfig, PerformanceConfig, PropertyNames,
    ServerConfig,
};

/// Default config file (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest to highest priority: built-in defaults, the optional
    /// config file, `WISHLIST_*` environment variables (`__` separates
    /// sections), then `NOTION_TOKEN` / `NOTION_DATABASE_ID`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("WISHLIST")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("notion.token", std::env::var("NOTION_TOKEN").ok())?
            .set_override_option(
                "notion.database_id",
                std::env::var("NOTION_DATABASE_ID").ok(),
            )?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
