//! Logger module
//!
//! Provides logging utilities for the wishlist server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error, warning and debug logging filtered by `logging.level`
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::{Config, LogLevel};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Uninitialized logger behaves as `info`
fn enabled(level: LogLevel) -> bool {
    writer::get().map_or(level <= LogLevel::Info, |w| w.enabled(level))
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    if !enabled(LogLevel::Info) {
        return;
    }
    write_info("======================================");
    write_info("Notion wishlist server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Data route: http://{addr}{}", crate::handler::DATA_ROUTE));
    write_info(&format!("Upstream: {}", config.notion.base_url));
    if !crate::notion::has_credentials(&config.notion) {
        write_info("Notion credentials not set, data route will report missing configuration");
    }
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================");
}

pub fn log_shutdown(reason: &str) {
    log_info(&format!("[Shutdown] {reason}, no longer accepting connections"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    log_error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_info(message: &str) {
    if enabled(LogLevel::Info) {
        write_info(message);
    }
}

pub fn log_debug(message: &str) {
    if enabled(LogLevel::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    if enabled(LogLevel::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}
