//! Download module containing the ranged transfer engine.
//!
//! # Overview
//!
//! - [`download`] - The [`Download`] request: what to fetch and where to put it
//! - [`ranged`] - [`RangedDownloader`], chunked transfer with size pre-check,
//!   progress reporting and cancellation cleanup
//! - [`outcome`] - [`DownloadOutcome`] and [`Progress`] counters
//! - [`summary`] - Per-file [`Summary`] and [`Status`] reporting
//!
//! # Example
//!
//! ```rust,no_run
//! use campdown::download::{Download, DownloadOutcome, Progress, RangedDownloader};
//! use campdown::http::{create_http_client, HttpClientConfig};
//! use reqwest::Url;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let downloader = RangedDownloader::new(client);
//! let url = Url::parse("https://t4.bcbits.com/stream/abc/mp3-128/1")?;
//! let download = Download::new(&url, "song.mp3");
//!
//! let outcome = downloader
//!     .download(&download, &|progress: Progress| println!("{}", progress), &CancellationToken::new())
//!     .await?;
//! assert!(matches!(outcome, DownloadOutcome::Completed | DownloadOutcome::SkippedIdentical));
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod outcome;
pub mod ranged;
pub mod summary;

pub use download::Download;
pub use outcome::{to_mib, DownloadOutcome, Progress, ProgressFn};
pub use ranged::{RangedDownloader, BLOCK_SIZE, RANGE_SIZE};
pub use summary::{Status, Summary};
