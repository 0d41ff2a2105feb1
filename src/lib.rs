//! Campdown extracts catalog metadata from Bandcamp pages and fetches the
//! audio and artwork they reference with resumable, ranged downloads.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use campdown::{downloader::DownloaderBuilder, Error};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .build();
//! let report = downloader
//!     .run("https://artist.bandcamp.com/track/song", &CancellationToken::new())
//!     .await?;
//! println!("{} file(s) on disk", report.completed());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! Data flows one way through the modules:
//!
//! - [`http`] - HTTP client with retries and tracing, and the page fetcher
//! - [`page`] - Page classification
//! - [`extract`] - Rule based metadata extraction from raw markup
//! - [`catalog`] - Tracks, albums, track listing collection and file naming
//! - [`download`] - The ranged transfer engine, outcomes and summaries
//! - [`downloader`] - The `Downloader` and `DownloaderBuilder` orchestrating a run
//! - [`progress`] - Progress bar styling and display management
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`utils`] - Text primitives, URL validation and header parsing

pub mod catalog;
pub mod download;
pub mod downloader;
pub mod error;
pub mod extract;
pub mod http;
pub mod page;
pub mod progress;
pub mod utils;

pub use catalog::{Album, PendingTrack, Track};
pub use download::{Download, DownloadOutcome, Progress, RangedDownloader, Status, Summary};
pub use downloader::{Downloader, DownloaderBuilder, Report};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig, PageFetcher};
pub use page::{classify, PageType};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use utils::content_length::{get_content_length, parse_content_range_total};
pub use utils::validate_url;
