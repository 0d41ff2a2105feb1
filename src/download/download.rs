//! File transfer requests.

use reqwest::Url;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
///
/// ```rust
/// use campdown::download::Download;
/// use reqwest::Url;
///
/// let url = Url::parse("https://f4.bcbits.com/img/a1_10.jpg")?;
/// let download = Download::new(&url, "/tmp/cover.jpg").ranged(false);
/// assert_eq!(download.filename(), "cover.jpg");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// Where the file is written.
    pub destination: PathBuf,
    /// Known size of the remote file. Saves the size probe when set.
    pub size_hint: Option<u64>,
    /// Skip the size pre-check and always overwrite.
    pub force: bool,
    /// Transfer in byte ranges. When `false` a single plain GET is used.
    pub ranged: bool,
}

impl Download {
    /// Creates a new ranged [`Download`].
    pub fn new(url: &Url, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.clone(),
            destination: destination.into(),
            size_hint: None,
            force: false,
            ranged: true,
        }
    }

    /// Set the expected size of the remote file.
    pub fn with_size_hint(self, size_hint: u64) -> Self {
        Self {
            size_hint: Some(size_hint),
            ..self
        }
    }

    /// Set whether to skip the size pre-check.
    pub fn force(self, force: bool) -> Self {
        Self { force, ..self }
    }

    /// Set whether to transfer in byte ranges.
    pub fn ranged(self, ranged: bool) -> Self {
        Self { ranged, ..self }
    }

    /// File name of the destination.
    pub fn filename(&self) -> String {
        self.destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Get a reference to the destination path.
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}
