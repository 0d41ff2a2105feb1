//! Album entities.

use super::collector::{base_url, collect_tracks};
use super::naming::album_directory_name;
use super::track::{join_link, PendingTrack, Track};
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::http::PageFetcher;
use crate::page::PageType;

use futures::stream::{self, StreamExt};
use reqwest::Url;
use tracing::{info, warn};

/// A listed track that could not be resolved.
#[derive(Debug)]
pub struct TrackFailure {
    /// Page URL of the track.
    pub url: Url,
    /// Position of the track within the album.
    pub index: Option<u32>,
    /// Why resolution failed.
    pub error: Error,
}

/// A resolved album and its track queue.
#[derive(Debug)]
pub struct Album {
    /// Page URL of the album.
    pub url: Url,
    /// Album title.
    pub title: String,
    /// Album artist.
    pub artist: Option<String>,
    /// Full size artwork.
    pub artwork_url: Option<Url>,
    /// Scheme and host of the album URL.
    pub base_url: String,
    /// Resolved tracks in listing order.
    pub tracks: Vec<Track>,
    /// Listed tracks that failed to resolve.
    pub failures: Vec<TrackFailure>,
}

impl Album {
    /// Resolve an album: read its metadata, collect the track listing and
    /// resolve every listed track.
    ///
    /// `markup` may carry the already fetched album page. Tracks are resolved
    /// with at most `concurrency` page requests in flight; the queue keeps the
    /// listing order either way. A track that fails to resolve is recorded in
    /// [`Album::failures`] and does not stop the others.
    pub async fn resolve(
        fetcher: &PageFetcher,
        url: Url,
        markup: Option<String>,
        concurrency: usize,
    ) -> Result<Album> {
        let markup = match markup {
            Some(markup) => markup,
            None => fetcher.fetch_markup(&url).await?,
        };

        let metadata = extract(&markup, PageType::Album)?;
        let base_url = base_url(&url);
        let artwork_url = metadata
            .artwork_url
            .as_deref()
            .and_then(|link| join_link(&url, link));

        let pending = collect_tracks(&markup, &base_url);
        info!("Listing found tracks");
        for track in &pending {
            info!("{}", track.url);
        }

        let parent_title = Some(metadata.title.clone());
        let results = stream::iter(pending)
            .map(|track| {
                let track = track.with_parent(parent_title.clone(), metadata.artist.clone());
                resolve_listed(fetcher, track)
            })
            .buffered(concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut tracks = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(track) => tracks.push(track),
                Err(failure) => failures.push(failure),
            }
        }

        Ok(Album {
            url,
            title: metadata.title,
            artist: metadata.artist,
            artwork_url,
            base_url,
            tracks,
            failures,
        })
    }

    /// Name of the album output directory: `<artist> - <album>`.
    pub fn directory_name(&self) -> String {
        album_directory_name(self.artist.as_deref(), &self.title)
    }
}

async fn resolve_listed(
    fetcher: &PageFetcher,
    track: PendingTrack,
) -> std::result::Result<Track, TrackFailure> {
    let url = track.url.clone();
    let index = track.index;
    track.resolve(fetcher).await.map_err(|error| {
        warn!("Failed to resolve track {}: {}", url, error);
        TrackFailure { url, index, error }
    })
}
