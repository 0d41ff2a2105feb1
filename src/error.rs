//! Error handling for campdown.
//!
//! This module provides centralized error handling for page fetching, metadata
//! extraction and file transfers. A non-200 answer during a file transfer is
//! deliberately *not* an error: it is reported as
//! [`DownloadOutcome::Failed`](crate::download::DownloadOutcome::Failed) so that
//! sibling transfers keep going.

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using campdown.
#[derive(Error, Debug)]
pub enum Error {
    /// The supplied URL is missing, lacks an `http://`/`https://` scheme, or
    /// cannot be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A page request answered with something other than `200 OK`.
    ///
    /// Fatal to the entity being resolved, never to its siblings.
    #[error("Failed to fetch {url}: status code {status}")]
    Fetch {
        /// URL of the page.
        url: String,
        /// Status code returned by the host.
        status: StatusCode,
    },

    /// A required field could not be extracted from the page markup.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The operation was cancelled by the user.
    #[error("Operation cancelled")]
    Cancelled,

    /// I/O Error.
    ///
    /// This variant wraps standard I/O errors that can occur during file operations,
    /// such as creating, writing, or removing files during the download process.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error from the HTTP middleware stack (retries, tracing).
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The embedded track information could not be decoded as JSON.
    #[error("JSON error")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Return `true` if this error stems from a user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias for operations that can fail with a campdown error.
pub type Result<T> = std::result::Result<T, Error>;
