//! Core downloader implementation: page to files on disk.
//!
//! [`Downloader::run`] validates the URL, fetches and classifies the page, then
//! branches on the [`PageType`]:
//!
//! - **Track**: resolve the track from the page already fetched, download its
//!   audio stream into the output directory, then its artwork.
//! - **Album**: resolve the album and its track queue, create
//!   `<output>/<artist> - <album>` once, download every track into it, then the
//!   album artwork.
//! - **Discography**: reported, nothing is downloaded.
//!
//! A track that fails to resolve or transfer is recorded in the [`Report`] and
//! never stops its siblings. Only an invalid URL, a failure to resolve the top
//! level page, or a cancellation ends the run with an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use campdown::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./music"))
//!     .concurrent_downloads(4)
//!     .build();
//!
//! let cancel = CancellationToken::new();
//! let report = downloader
//!     .run("https://artist.bandcamp.com/album/some-album", &cancel)
//!     .await?;
//! for summary in report.summaries() {
//!     println!("{} - {:?}", summary.label(), summary.status());
//! }
//! # Ok(())
//! # }
//! ```

use super::config::DownloaderConfig;
use crate::catalog::{cover_file_name, Album, PendingTrack, Track};
use crate::download::ranged::cancellable;
use crate::download::{Download, DownloadOutcome, RangedDownloader, Status, Summary};
use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig, PageFetcher};
use crate::page::{classify, PageType};
use crate::progress::ProgressDisplay;
use crate::utils::validate_url;

use futures::stream::{self, StreamExt};
use reqwest::{header::HeaderMap, Url};
use std::fmt;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of one [`Downloader::run`].
#[derive(Debug, Clone)]
pub struct Report {
    page_type: PageType,
    summaries: Vec<Summary>,
}

impl Report {
    /// Classification of the requested page.
    pub fn page_type(&self) -> PageType {
        self.page_type
    }

    /// One summary per attempted file and per listed track that could not be
    /// resolved, tracks first, artwork last.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// Number of files that are complete on disk.
    pub fn completed(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_success()).count()
    }

    /// Number of files that failed to resolve or transfer.
    pub fn failed(&self) -> usize {
        self.summaries.iter().filter(|s| s.is_failure()).count()
    }

    /// Return `true` if the page could be handled and no file failed.
    pub fn is_success(&self) -> bool {
        self.page_type.is_downloadable() && self.failed() == 0
    }
}

/// Network handles shared by every transfer of one run.
struct Session<'a> {
    fetcher: PageFetcher,
    transfer: RangedDownloader,
    display: ProgressDisplay,
    cancel: &'a CancellationToken,
}

/// Represents the download controller.
///
/// A downloader can be created via its builder:
///
/// ```rust
/// # fn main()  {
/// use campdown::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloaderConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of retries per request.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the number of concurrent downloads.
    pub fn concurrent_downloads(&self) -> usize {
        self.config.concurrent_downloads
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether to use range requests for content length.
    pub fn use_range_for_content_length(&self) -> bool {
        self.config.use_range_for_content_length
    }

    /// Gets whether existing files are overwritten without a size check.
    pub fn force(&self) -> bool {
        self.config.force
    }

    /// Download everything the page at `url` offers.
    ///
    /// Returns [`Error::InvalidUrl`] before any request when the URL is not an
    /// absolute `http(s)` URL, [`Error::Fetch`] or [`Error::Extraction`] when
    /// the page itself cannot be resolved, and [`Error::Cancelled`] once
    /// `cancel` fires. Every other failure is reported per file in the
    /// [`Report`].
    pub async fn run(&self, url: &str, cancel: &CancellationToken) -> Result<Report> {
        let url = validate_url(url)?;

        let client = create_http_client(HttpClientConfig {
            retries: self.config.retries,
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
        })?;
        let fetcher = PageFetcher::new(client.clone());
        let transfer = RangedDownloader::new(client)
            .range_size(self.config.range_size)
            .block_size(self.config.block_size)
            .use_range_for_content_length(self.config.use_range_for_content_length);

        info!("Fetching {}", url);
        let markup = cancellable(cancel, fetcher.fetch_markup(&url)).await??;
        let page_type = classify(&markup);
        debug!(%page_type, "Classified {}", url);

        let single_file = page_type == PageType::Track;
        let session = Session {
            fetcher,
            transfer,
            display: ProgressDisplay::new(self.config.style_options.clone(), 0, single_file),
            cancel,
        };

        let result = match page_type {
            PageType::Track => self.track_page(&session, url, markup).await,
            PageType::Album => self.album_page(&session, url, markup).await,
            PageType::Discography => {
                info!("Discography page detected. Downloading this is not in place yet.");
                Ok(Vec::new())
            }
            PageType::Unknown | PageType::NotRecognized => {
                warn!("{} is not a downloadable page ({})", url, page_type);
                Ok(Vec::new())
            }
        };
        session.display.finish();

        Ok(Report {
            page_type,
            summaries: result?,
        })
    }

    async fn track_page(
        &self,
        session: &Session<'_>,
        url: Url,
        markup: String,
    ) -> Result<Vec<Summary>> {
        let track = PendingTrack::new(url).resolve_with(&markup)?;
        let directory = &self.config.directory;
        create_directory(directory).await?;

        session.display.main().set_length(1 + track.artwork_url.is_some() as u64);
        let mut summaries = vec![self.fetch_track(session, &track, directory).await?];
        if let Some(artwork_url) = &track.artwork_url {
            summaries.push(self.fetch_artwork(session, artwork_url, directory).await?);
        }

        info!("Finished track download.");
        Ok(summaries)
    }

    async fn album_page(
        &self,
        session: &Session<'_>,
        url: Url,
        markup: String,
    ) -> Result<Vec<Summary>> {
        let album = cancellable(
            session.cancel,
            Album::resolve(
                &session.fetcher,
                url,
                Some(markup),
                self.config.concurrent_downloads,
            ),
        )
        .await??;

        let directory = self.config.directory.join(album.directory_name());
        create_directory(&directory).await?;

        let mut summaries: Vec<Summary> = album
            .failures
            .iter()
            .map(|failure| {
                let summary = Summary::new(failure.url.as_str(), None).fail(&failure.error);
                self.notify(summary)
            })
            .collect();

        session
            .display
            .main()
            .set_length(album.tracks.len() as u64 + album.artwork_url.is_some() as u64);

        // Drain every transfer so that each one removes its own partial file
        // before a cancellation is propagated.
        let results = stream::iter(&album.tracks)
            .map(|track| self.fetch_track(session, track, &directory))
            .buffer_unordered(self.config.concurrent_downloads.max(1))
            .collect::<Vec<_>>()
            .await;
        for result in results {
            summaries.push(result?);
        }

        if let Some(artwork_url) = &album.artwork_url {
            summaries.push(self.fetch_artwork(session, artwork_url, &directory).await?);
        }

        info!("Finished album download.");
        Ok(summaries)
    }

    /// Download the audio stream of a resolved track into `directory`.
    async fn fetch_track(
        &self,
        session: &Session<'_>,
        track: &Track,
        directory: &Path,
    ) -> Result<Summary> {
        let label = track.formatted_title();

        let Some(audio_url) = &track.audio_url else {
            info!("{} is not openly available - skipping track", track.title);
            session.display.increment_main();
            let summary = Summary::new(label, None).not_available("no public audio stream");
            return Ok(self.notify(summary));
        };

        let download = Download::new(audio_url, directory.join(track.file_name()))
            .force(self.config.force);
        let summary = self.fetch_file(session, label, &download).await?;

        if let Status::Failed(code) = summary.status() {
            warn!(
                "Failed to download {}. Error code {}",
                summary.label(),
                code.as_u16()
            );
        }
        Ok(summary)
    }

    /// Download the artwork with a single plain GET into `directory`.
    async fn fetch_artwork(
        &self,
        session: &Session<'_>,
        artwork_url: &Url,
        directory: &Path,
    ) -> Result<Summary> {
        let destination = directory.join(cover_file_name(artwork_url));
        let download = Download::new(artwork_url, &destination)
            .force(self.config.force)
            .ranged(false);
        let summary = self.fetch_file(session, "cover", &download).await?;

        match summary.status() {
            Status::Completed => info!("Saved album art to {}", destination.display()),
            Status::SkippedIdentical => info!("Artwork already found."),
            Status::Failed(code) => {
                warn!("Failed to download the artwork. Error code {}", code.as_u16())
            }
            _ => {}
        }
        Ok(summary)
    }

    /// Run one transfer behind a child progress bar.
    ///
    /// Only a cancellation is returned as an error; any other failure becomes
    /// a [`Status::Fail`] summary.
    async fn fetch_file(
        &self,
        session: &Session<'_>,
        label: impl Into<String>,
        download: &Download,
    ) -> Result<Summary> {
        info!("Writing file to {}", download.destination().display());

        let pb = session.display.create_child_progress(0, 0);
        let observer = ProgressDisplay::observer(pb.clone());
        let result = session
            .transfer
            .download(download, &observer, session.cancel)
            .await;
        session.display.finish_child(pb);

        let summary = Summary::new(label, Some(download.destination.clone()));
        let summary = match result {
            Ok(outcome) => {
                let size = match outcome {
                    DownloadOutcome::Failed(_) => 0,
                    _ => fs::metadata(&download.destination)
                        .await
                        .map(|m| m.len())
                        .unwrap_or(0),
                };
                summary.with_outcome(outcome).with_size(size)
            }
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(e) => {
                warn!("Failed to download {}: {}", download.url, e);
                summary.fail(e)
            }
        };

        session.display.increment_main();
        Ok(self.notify(summary))
    }

    /// Hand a finished summary to the completion callback.
    fn notify(&self, summary: Summary) -> Summary {
        if let Some(ref callback) = self.config.on_complete {
            callback(&summary);
        }
        summary
    }
}

async fn create_directory(directory: &Path) -> Result<()> {
    debug!("Creating destination directory {:?}", directory);
    fs::create_dir_all(directory).await?;
    Ok(())
}
