//! Downloader module: the orchestrator turning one page URL into files.
//!
//! # Overview
//!
//! - `downloader` - Core [`Downloader`] with the per page type download flows
//! - `builder` - [`DownloaderBuilder`] for flexible configuration using the builder pattern
//! - `config` - Configuration structures and callback types
//!
//! # Examples
//!
//! ```rust
//! use campdown::downloader::DownloaderBuilder;
//!
//! // Create a downloader with hidden progress bars
//! let downloader = DownloaderBuilder::hidden().concurrent_downloads(2).build();
//! assert_eq!(downloader.concurrent_downloads(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::DownloaderBuilder;
pub use config::{default_directory, DownloadCallback, DownloaderConfig};
pub use downloader::{Downloader, Report};
