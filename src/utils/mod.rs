//! Shared utility functions.
//!
//! This module contains utility functions that are used across multiple
//! modules in the campdown crate.
//!
//! # Overview
//!
//! - [`content_length`] - Content length extraction from HTTP responses
//! - [`text`] - Delimiter slicing, HTML entity decoding and path-safe names
//! - [`url`] - Validation of the page URL supplied by the user
//!
//! # Examples
//!
//! ```rust
//! use campdown::utils::{html_unescape, slice_between};
//!
//! let markup = r#"<span itemprop="name">Rock &amp; Roll</span>"#;
//! let album = slice_between(markup, r#"<span itemprop="name">"#, "</span>").map(html_unescape);
//! assert_eq!(album.as_deref(), Some("Rock & Roll"));
//! ```

pub mod content_length;
pub mod text;
pub mod url;

// Re-export commonly used utilities
pub use content_length::{get_content_length, parse_content_range_total, range_header};
pub use text::{
    html_unescape, safe_file_name, safe_path, scan_until, slice_between, strip_chars,
};
pub use url::validate_url;
