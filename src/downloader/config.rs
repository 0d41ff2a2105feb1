//! Configuration structures and defaults for the downloader.
//!
//! # Examples
//!
//! ```rust
//! use campdown::downloader::DownloadCallback;
//! use campdown::download::{Status, Summary};
//!
//! let callback: DownloadCallback = Box::new(|summary: &Summary| match summary.status() {
//!     Status::Completed => println!("Downloaded: {}", summary.label()),
//!     Status::Failed(code) => println!("Failed: {} - {}", summary.label(), code),
//!     _ => {}
//! });
//! ```

use crate::download::{Summary, BLOCK_SIZE, RANGE_SIZE};
use crate::StyleOptions;

use reqwest::header::HeaderMap;
use std::env::{current_dir, current_exe};
use std::path::PathBuf;
use std::sync::Arc;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of retries per request, for transient failures only.
    pub retries: u32,
    /// Number of maximum concurrent track downloads and page resolutions.
    pub concurrent_downloads: usize,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy for every request.
    pub proxy: Option<reqwest::Proxy>,
    /// Probe the remote size with `Range: bytes=0-0` instead of a plain GET.
    pub use_range_for_content_length: bool,
    /// Size of one ranged request.
    pub range_size: u64,
    /// Size of one written block.
    pub block_size: usize,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
    /// Skip the size pre-check and overwrite existing files.
    pub force: bool,
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("directory", &self.directory)
            .field("retries", &self.retries)
            .field("concurrent_downloads", &self.concurrent_downloads)
            .field("style_options", &self.style_options)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy.is_some())
            .field(
                "use_range_for_content_length",
                &self.use_range_for_content_length,
            )
            .field("range_size", &self.range_size)
            .field("block_size", &self.block_size)
            .field("on_complete", &self.on_complete.is_some())
            .field("force", &self.force)
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retries: 3,
            concurrent_downloads: 1,
            style_options: StyleOptions::default(),
            headers: None,
            proxy: None,
            use_range_for_content_length: false,
            range_size: RANGE_SIZE,
            block_size: BLOCK_SIZE,
            on_complete: None,
            force: false,
        }
    }
}

/// The directory holding the running executable, or the current directory
/// when that cannot be determined.
pub fn default_directory() -> PathBuf {
    current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .or_else(|| current_dir().ok())
        .unwrap_or_default()
}
