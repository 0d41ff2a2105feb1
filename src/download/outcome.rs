//! Transfer outcomes and progress counters.

use reqwest::StatusCode;
use std::fmt;

const MIB: u64 = 1024 * 1024;

/// Result of a single file transfer attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written in full.
    Completed,
    /// A file with the remote byte length was already there; nothing was transferred.
    SkippedIdentical,
    /// The host answered a size probe or a range request with this status.
    /// Bytes written before the failure stay on disk.
    Failed(StatusCode),
    /// The host stopped sending data before `expected` bytes arrived.
    /// Bytes written so far stay on disk.
    Incomplete {
        /// Bytes written to the file.
        written: u64,
        /// Remote length the transfer aimed for.
        expected: u64,
    },
}

impl DownloadOutcome {
    /// Return `true` if the file is complete on disk afterwards.
    pub fn is_complete(&self) -> bool {
        matches!(self, DownloadOutcome::Completed | DownloadOutcome::SkippedIdentical)
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::Completed => f.write_str("completed"),
            DownloadOutcome::SkippedIdentical => f.write_str("skipped, identical file found"),
            DownloadOutcome::Failed(status) => write!(f, "failed with status code {}", status.as_u16()),
            DownloadOutcome::Incomplete { written, expected } => {
                write!(f, "incomplete, {} of {} bytes received", written, expected)
            }
        }
    }
}

/// Progress of one transfer in exact bytes.
///
/// `total` is `0` when the host did not advertise a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    /// Bytes written so far.
    pub downloaded: u64,
    /// Bytes expected in total.
    pub total: u64,
}

impl Progress {
    /// Create a new [`Progress`].
    pub fn new(downloaded: u64, total: u64) -> Self {
        Self { downloaded, total }
    }

    /// Bytes written so far, in MiB with two decimals.
    pub fn downloaded_mib(&self) -> f64 {
        to_mib(self.downloaded)
    }

    /// Total size in MiB with two decimals.
    pub fn total_mib(&self) -> f64 {
        to_mib(self.total)
    }

    /// Completed fraction in `0.0..=1.0`, or `None` if the total is unknown.
    pub fn fraction(&self) -> Option<f64> {
        (self.total > 0).then(|| (self.downloaded as f64 / self.total as f64).min(1.0))
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}MB / {}MB", self.downloaded_mib(), self.total_mib())
    }
}

/// Convert a byte count to MiB, truncated to two decimals.
///
/// Truncation keeps a running display below the total until the last block lands.
pub fn to_mib(bytes: u64) -> f64 {
    (bytes.saturating_mul(100) / MIB) as f64 / 100.0
}

/// Observer invoked after every written block.
pub type ProgressFn = dyn Fn(Progress) + Send + Sync;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mib_truncates() {
        assert_eq!(to_mib(0), 0.0);
        assert_eq!(to_mib(MIB), 1.0);
        assert_eq!(to_mib(MIB + MIB / 2), 1.5);
        // 1.999... MiB must not show as 2.0
        assert_eq!(to_mib(2 * MIB - 1), 1.99);
    }

    #[test]
    fn test_progress_fraction() {
        assert_eq!(Progress::new(5, 10).fraction(), Some(0.5));
        assert_eq!(Progress::new(5, 0).fraction(), None);
        assert_eq!(Progress::new(MIB, 2 * MIB).to_string(), "1MB / 2MB");
    }

    #[test]
    fn test_outcome() {
        assert!(DownloadOutcome::Completed.is_complete());
        assert!(DownloadOutcome::SkippedIdentical.is_complete());
        assert!(!DownloadOutcome::Failed(StatusCode::NOT_FOUND).is_complete());
        assert_eq!(
            DownloadOutcome::Failed(StatusCode::NOT_FOUND).to_string(),
            "failed with status code 404"
        );

        let short = DownloadOutcome::Incomplete {
            written: 10,
            expected: 20,
        };
        assert!(!short.is_complete());
        assert_eq!(short.to_string(), "incomplete, 10 of 20 bytes received");
    }
}
