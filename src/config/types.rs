// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub notion: NotionConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Log verbosity, lowest to highest
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    pub error_log_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            access_log: true,
            access_log_format: "combined".to_string(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Upper bound for a whole connection, in seconds
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            connection_timeout: 30,
            max_connections: None,
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub server_name: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: "notion-wishlist".to_string(),
        }
    }
}

/// Upstream Notion database settings
///
/// `token` and `database_id` are secrets; they are only checked when the
/// data route is hit, so the server starts without them.
#[derive(Deserialize, Clone)]
#[serde(default)]
pub struct NotionConfig {
    pub token: Option<String>,
    pub database_id: Option<String>,
    pub base_url: String,
    /// Value sent in the `Notion-Version` header
    pub api_version: String,
    /// Upstream request timeout in seconds, 0 disables it
    pub timeout: u64,
    pub properties: PropertyNames,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            database_id: None,
            base_url: "https://api.notion.com/v1".to_string(),
            api_version: "2022-06-28".to_string(),
            timeout: 30,
            properties: PropertyNames::default(),
        }
    }
}

impl std::fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("database_id", &self.database_id)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Database column names read for each product field
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PropertyNames {
    pub title: String,
    pub url: String,
    pub bought: String,
    pub note: String,
    pub image: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Name".to_string(),
            url: "Lien".to_string(),
            bought: "Acheté".to_string(),
            note: "Note".to_string(),
            image: "image".to_string(),
        }
    }
}
