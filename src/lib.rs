//! Notion wishlist server
//!
//! Serves a gift wishlist page and a JSON data route backed by one Notion
//! database query.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod notion;
pub mod server;

#[cfg(test)]
mod testing;
