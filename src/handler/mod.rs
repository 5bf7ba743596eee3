//! Request handler module
//!
//! Responsible for request routing dispatch: CORS preflight, the Notion data
//! route, and the wishlist page served for everything else.

pub mod page;
pub mod products;
pub mod router;

// Re-export main entry point
pub use router::{dispatch, handle_request, DATA_ROUTE};
