//! Notion data adapter
//!
//! Queries one database and reshapes its pages into a flat product list.

mod error;
mod product;
mod query;

pub use error::NotionError;
pub use product::{products_from_query, Product, UNTITLED};
pub use query::{fetch_products, has_credentials, query_url};
