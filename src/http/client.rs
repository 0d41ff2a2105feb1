//! The shared HTTP client.
//!
//! One [`Downloader::run`](crate::downloader::Downloader::run) builds one
//! client and hands clones to both the [`PageFetcher`](super::PageFetcher),
//! which reads catalog and track pages, and the
//! [`RangedDownloader`](crate::download::RangedDownloader), which probes sizes
//! and pulls audio ranges and artwork. Connections are pooled across all of
//! them, and every request picks up the configured proxy and headers.
//!
//! Only transient failures are retried here. A `404` for a track page or a
//! `403` for a stream range goes back to the caller untouched.
//!
//! # Example
//!
//! ```rust
//! use campdown::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "campdown/0.2".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 5,
//!     proxy: None,
//!     headers: Some(headers),
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;
use tracing::debug;

/// Settings for [`create_http_client`], taken from the downloader configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of retries for transient failures.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            proxy: None,
            headers: None,
        }
    }
}

/// Build the client for one run.
///
/// Connection errors, `5xx`, `408` and `429` are retried with exponential
/// backoff up to `config.retries` times. Each attempt gets its own tracing span.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let HttpClientConfig {
        retries,
        proxy,
        headers,
    } = config;

    let mut builder = reqwest::Client::builder();
    if let Some(proxy) = proxy {
        builder = builder.proxy(proxy);
    }
    if let Some(headers) = headers {
        builder = builder.default_headers(headers);
    }
    let transport = builder.build()?;

    let backoff = ExponentialBackoff::builder().build_with_max_retries(retries);
    debug!(retries, "Building HTTP client");

    Ok(ClientBuilder::new(transport)
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(backoff))
        .build())
}
