//! HTTP module containing client setup and page retrieval.
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`fetcher`] - [`PageFetcher`], the single-GET page reader every other
//!   component builds on
//!
//! # Example
//!
//! ```rust,no_run
//! use campdown::http::{create_http_client, HttpClientConfig, PageFetcher};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let fetcher = PageFetcher::new(client);
//! let url = Url::parse("https://artist.bandcamp.com/track/song")?;
//! let markup = fetcher.fetch_markup(&url).await?;
//! println!("{} bytes of markup", markup.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fetcher;

pub use client::{create_http_client, HttpClientConfig};
pub use fetcher::{Page, PageFetcher};
