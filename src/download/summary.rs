//! Per-file download summaries.
//!
//! The [`Downloader`](crate::downloader::Downloader) produces one [`Summary`]
//! for every file it attempted and for every listed track it could not
//! resolve. The summaries are what status lines and exit codes are derived from.
//!
//! ```rust
//! use campdown::download::{DownloadOutcome, Status, Summary};
//!
//! let summary = Summary::new("Artist - Song", None).with_outcome(DownloadOutcome::Completed);
//! assert_eq!(summary.status(), &Status::Completed);
//! assert!(summary.is_success());
//! ```

use super::outcome::DownloadOutcome;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download not yet started
    NotStarted,
    /// The file was written in full
    Completed,
    /// An identical file was already on disk
    SkippedIdentical,
    /// The host refused the transfer with this status
    Failed(StatusCode),
    /// The track has no public audio stream; nothing to download
    NotAvailable(String),
    /// Resolution or transfer failed with an error message
    Fail(String),
}

impl From<DownloadOutcome> for Status {
    fn from(outcome: DownloadOutcome) -> Self {
        match outcome {
            DownloadOutcome::Completed => Status::Completed,
            DownloadOutcome::SkippedIdentical => Status::SkippedIdentical,
            DownloadOutcome::Failed(status) => Status::Failed(status),
            DownloadOutcome::Incomplete { .. } => Status::Fail(outcome.to_string()),
        }
    }
}

/// Represents the result for one file.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Human readable name: a composed track title, or `cover`.
    label: String,
    /// Destination on disk, when one was chosen.
    destination: Option<PathBuf>,
    /// Size on disk in bytes.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`].
    pub fn new(label: impl Into<String>, destination: Option<PathBuf>) -> Self {
        Self {
            label: label.into(),
            destination,
            size: 0,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Attach the outcome of a transfer.
    pub fn with_outcome(self, outcome: DownloadOutcome) -> Self {
        self.with_status(outcome.into())
    }

    /// Set the size on disk.
    pub fn with_size(self, size: u64) -> Self {
        Self { size, ..self }
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        self.with_status(Status::Fail(msg.to_string()))
    }

    /// Mark the summary as not available with a message.
    pub fn not_available(self, msg: impl std::fmt::Display) -> Self {
        self.with_status(Status::NotAvailable(msg.to_string()))
    }

    /// Get the summary's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the summary's destination.
    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Return `true` if the file is complete on disk.
    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Completed | Status::SkippedIdentical)
    }

    /// Return `true` if resolving or transferring this file went wrong.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, Status::Failed(_) | Status::Fail(_))
    }
}
