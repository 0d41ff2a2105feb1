//! Chunked, resumable binary transfers.
//!
//! The [`RangedDownloader`] moves one remote resource to one local file:
//!
//! 1. The remote length is probed (or taken from the size hint).
//! 2. Unless forced, an existing file of exactly that length is left alone and
//!    reported as [`DownloadOutcome::SkippedIdentical`]. A file of any other
//!    length is overwritten.
//! 3. `[0, length)` is requested in fixed-size ranges, in ascending order, and
//!    every response body is written straight to the open file in small blocks.
//!    A [`Progress`] update follows every block. A range answered with fewer
//!    bytes than asked for is resumed from the first missing byte.
//!
//! Every network await races the cancellation token. On cancellation the file
//! handle is closed and the partial file removed before [`Error::Cancelled`]
//! is returned, so a later run never mistakes it for a complete one.

use super::download::Download;
use super::outcome::{DownloadOutcome, Progress, ProgressFn};
use crate::error::{Error, Result};
use crate::utils::content_length::{get_content_length, range_header};

use futures::StreamExt;
use reqwest::{header::RANGE, Response, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::future::Future;
use std::io::ErrorKind;
use std::path::Path;
use tokio::{
    fs::{self, File, OpenOptions},
    io::AsyncWriteExt,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Size of one ranged request: 1 MiB.
pub const RANGE_SIZE: u64 = 1024 * 1024;

/// Size of one written block: 2 KiB.
pub const BLOCK_SIZE: usize = 2048;

/// Answer to the size probe.
enum Probe {
    Length(Option<u64>),
    Failed(StatusCode),
}

/// Transfers remote resources to local files in byte ranges.
#[derive(Debug, Clone)]
pub struct RangedDownloader {
    client: ClientWithMiddleware,
    range_size: u64,
    block_size: usize,
    use_range_for_content_length: bool,
}

impl RangedDownloader {
    /// Create a downloader with the default range and block sizes.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self {
            client,
            range_size: RANGE_SIZE,
            block_size: BLOCK_SIZE,
            use_range_for_content_length: false,
        }
    }

    /// Set the size of one ranged request.
    pub fn range_size(mut self, range_size: u64) -> Self {
        self.range_size = range_size.max(1);
        self
    }

    /// Set the size of one written block.
    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Probe the remote length with a `Range: bytes=0-0` request instead of
    /// reading the headers of a plain GET.
    pub fn use_range_for_content_length(mut self, use_range: bool) -> Self {
        self.use_range_for_content_length = use_range;
        self
    }

    /// Get the size of one ranged request.
    pub fn get_range_size(&self) -> u64 {
        self.range_size
    }

    /// Get the size of one written block.
    pub fn get_block_size(&self) -> usize {
        self.block_size
    }

    /// Transfer `download.url` to `download.destination`.
    ///
    /// Host errors are returned as [`DownloadOutcome::Failed`], and a body that
    /// stops short of the remote length as [`DownloadOutcome::Incomplete`]; only
    /// network, I/O and cancellation problems are errors.
    pub async fn download(
        &self,
        download: &Download,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        if download.ranged {
            self.fetch_ranged(download, on_progress, cancel).await
        } else {
            self.fetch_whole(download, on_progress, cancel).await
        }
    }

    async fn fetch_ranged(
        &self,
        download: &Download,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        let total = match download.size_hint {
            Some(size) => Some(size),
            None => match self.probe(&download.url, cancel).await? {
                Probe::Length(length) => length,
                Probe::Failed(status) => {
                    warn!("Request error {} for {}", status.as_u16(), download.url);
                    return Ok(DownloadOutcome::Failed(status));
                }
            },
        };

        let Some(total) = total else {
            debug!("No content length for {}, using a single request", download.url);
            return self.fetch_whole(download, on_progress, cancel).await;
        };

        if let Some(outcome) = precheck(download, total).await? {
            return Ok(outcome);
        }

        let mut file = create_output(&download.destination).await?;
        let result = self
            .transfer_ranges(&mut file, download, total, on_progress, cancel)
            .await;
        finish(file, &download.destination, result).await
    }

    async fn fetch_whole(
        &self,
        download: &Download,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        debug!("Fetching {}", download.url);
        let response = cancellable(cancel, self.client.get(download.url.clone()).send()).await??;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Request error {} for {}", status.as_u16(), download.url);
            return Ok(DownloadOutcome::Failed(status));
        }

        let total = download.size_hint.or_else(|| get_content_length(&response));
        if let Some(total) = total {
            if let Some(outcome) = precheck(download, total).await? {
                return Ok(outcome);
            }
        }

        let mut file = create_output(&download.destination).await?;
        let result = self
            .transfer_whole(
                &mut file,
                response,
                download,
                total.unwrap_or(0),
                on_progress,
                cancel,
            )
            .await;
        finish(file, &download.destination, result).await
    }

    async fn transfer_whole(
        &self,
        file: &mut File,
        response: Response,
        download: &Download,
        total: u64,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        let mut written = 0;
        on_progress(Progress::new(written, total));
        self.write_body(response, file, &mut written, total, on_progress, cancel)
            .await?;
        file.flush().await?;

        if total > 0 && written != total {
            warn!("{} ended after {} of {} bytes", download.url, written, total);
            return Ok(DownloadOutcome::Incomplete {
                written,
                expected: total,
            });
        }
        Ok(DownloadOutcome::Completed)
    }

    async fn transfer_ranges(
        &self,
        file: &mut File,
        download: &Download,
        total: u64,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<DownloadOutcome> {
        let mut written = 0;
        on_progress(Progress::new(written, total));

        let mut start = 0;
        while start < total {
            let end = start.saturating_add(self.range_size).min(total) - 1;
            let range = range_header(start, end);
            debug!("Requesting {} of {}", range, download.url);

            let request = self.client.get(download.url.clone()).header(RANGE, range);
            let response = cancellable(cancel, request.send()).await??;

            match response.status() {
                StatusCode::PARTIAL_CONTENT => {
                    self.write_body(response, file, &mut written, total, on_progress, cancel)
                        .await?;
                    if written == start {
                        warn!("Empty range {}-{} from {}", start, end, download.url);
                        break;
                    }
                    if written <= end {
                        debug!("Short range from {}, resuming at byte {}", download.url, written);
                    }
                }
                // The host ignored the range and sent everything.
                StatusCode::OK if start == 0 => {
                    debug!("Range ignored by host, streaming the full body");
                    self.write_body(response, file, &mut written, total, on_progress, cancel)
                        .await?;
                    break;
                }
                status => {
                    warn!(
                        "Request error {} for {} after {} bytes",
                        status.as_u16(),
                        download.url,
                        written
                    );
                    return Ok(DownloadOutcome::Failed(status));
                }
            }

            // The body is appended contiguously, so the next range starts
            // where the file ends even if the host sent less than asked for.
            start = written;
        }

        file.flush().await?;

        if written != total {
            warn!("{} ended after {} of {} bytes", download.url, written, total);
            return Ok(DownloadOutcome::Incomplete {
                written,
                expected: total,
            });
        }
        Ok(DownloadOutcome::Completed)
    }

    /// Stream a response body to `file` in blocks of at most `block_size`
    /// bytes, reporting progress after each one.
    async fn write_body(
        &self,
        response: Response,
        file: &mut File,
        written: &mut u64,
        total: u64,
        on_progress: &ProgressFn,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let mut stream = response.bytes_stream();
        while let Some(chunk) = cancellable(cancel, stream.next()).await? {
            let chunk = chunk?;
            for block in chunk.chunks(self.block_size) {
                file.write_all(block).await?;
                *written += block.len() as u64;
                on_progress(Progress::new(*written, total));

                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
            }
        }
        Ok(())
    }

    /// Read the remote length without transferring the body.
    async fn probe(&self, url: &Url, cancel: &CancellationToken) -> Result<Probe> {
        let mut request = self.client.get(url.clone());
        if self.use_range_for_content_length {
            request = request.header(RANGE, range_header(0, 0));
        }

        let response = cancellable(cancel, request.send()).await??;
        let status = response.status();
        let accepted = status == StatusCode::OK
            || (self.use_range_for_content_length && status == StatusCode::PARTIAL_CONTENT);
        if !accepted {
            return Ok(Probe::Failed(status));
        }

        let length = get_content_length(&response);
        debug!(?length, "Probed size of {}", url);
        Ok(Probe::Length(length))
    }
}

/// Run `future` unless `cancel` fires first.
pub(crate) async fn cancellable<F: Future>(cancel: &CancellationToken, future: F) -> Result<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        output = future => Ok(output),
    }
}

/// Compare an existing destination with the remote length.
///
/// Returns `Some(SkippedIdentical)` when nothing needs to be transferred.
async fn precheck(download: &Download, total: u64) -> Result<Option<DownloadOutcome>> {
    if download.force {
        return Ok(None);
    }

    match fs::metadata(&download.destination).await {
        Ok(metadata) if metadata.is_file() => {
            if metadata.len() == total {
                info!("File already found. Skipping download.");
                Ok(Some(DownloadOutcome::SkippedIdentical))
            } else {
                info!("File already found but the file size doesn't match up. Redownloading.");
                Ok(None)
            }
        }
        Ok(_) => Ok(None),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn create_output(destination: &Path) -> Result<File> {
    debug!("Creating destination file {:?}", destination);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(destination)
        .await?;
    Ok(file)
}

/// Close the output and, if the transfer was cancelled, remove the partial file.
async fn finish(
    mut file: File,
    destination: &Path,
    result: Result<DownloadOutcome>,
) -> Result<DownloadOutcome> {
    if let Err(Error::Cancelled) = result {
        // Wait for the pending background write, or the unlink below can fail
        // on platforms that refuse to remove open files.
        let _ = file.flush().await;
        drop(file);

        debug!("Removing partial file {:?}", destination);
        match fs::remove_file(destination).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove partial file {:?}: {}", destination, e),
        }
    }

    result
}
