//! Wishlist page
//!
//! A fixed document; the embedded script fetches the data route and renders
//! one card per product in the browser.

use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

const WISHLIST_HTML: &str = include_str!("wishlist.html");

/// The static wishlist document
pub const fn render_page() -> &'static str {
    WISHLIST_HTML
}

/// Serve the wishlist page, headers only for HEAD
pub fn serve_page(is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(render_page(), is_head)
}
