//! Input URL validation.

use crate::error::{Error, Result};
use reqwest::Url;

/// Validate a user supplied page URL.
///
/// The URL must carry an `http://` or `https://` scheme and parse cleanly.
/// A failure here is a validation problem, never a network one.
///
/// # Example
///
/// ```rust
/// use campdown::utils::validate_url;
///
/// assert!(validate_url("https://artist.bandcamp.com/album/lp").is_ok());
/// assert!(validate_url("artist.bandcamp.com/album/lp").is_err());
/// ```
pub fn validate_url(value: &str) -> Result<Url> {
    let value = value.trim();
    if !value.contains("http://") && !value.contains("https://") {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" does not start with http:// or https://",
            value
        )));
    }

    let url = Url::parse(value).map_err(|e| {
        Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
    })?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(Error::InvalidUrl(format!(
            "The url \"{}\" is not an http(s) page address",
            value
        ))),
    }
}
