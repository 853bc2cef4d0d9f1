//! Request matching utilities.

mod url;

pub use url::{sanitize_url, url_matches};
