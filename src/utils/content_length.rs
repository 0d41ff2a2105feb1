//! Content length extraction utilities.
//!
//! The size pre-check compares the remote content length with what is on disk,
//! so this module reads it from either a `Content-Range` header (answer to a
//! `Range: bytes=0-0` probe) or a plain `Content-Length` header.

use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_RANGE},
    Response,
};

/// Extract the total size of the remote resource from a response.
///
/// A `Content-Range` header wins over `Content-Length`, since the latter only
/// describes the slice that was returned for a ranged request.
///
/// Returns `None` when neither header carries a usable value.
pub fn get_content_length(response: &Response) -> Option<u64> {
    if let Some(total) = response
        .headers()
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range_total)
    {
        return Some(total);
    }

    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .or_else(|| response.content_length())
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total"
///
/// # Example
///
/// ```rust
/// use campdown::utils::parse_content_range_total;
///
/// let total = parse_content_range_total("bytes 0-1023/2048");
/// assert_eq!(total, Some(2048));
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}

/// Build the value of a `Range` header covering `start..=end`.
pub fn range_header(start: u64, end: u64) -> String {
    format!("bytes={}-{}", start, end)
}
