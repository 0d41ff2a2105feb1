//! Track entities.
//!
//! A track starts out as a [`PendingTrack`]: a URL, an optional position and
//! whatever the parent album already knows. Resolution consumes it and
//! produces an immutable [`Track`], so unresolved fields can never be read.

use super::naming::{audio_file_name, format_title};
use crate::error::Result;
use crate::extract::extract;
use crate::http::PageFetcher;
use crate::page::PageType;

use reqwest::Url;
use tracing::warn;

/// A track that has been located but not resolved yet.
#[derive(Debug, Clone)]
pub struct PendingTrack {
    /// Page URL of the track.
    pub url: Url,
    /// 1-based position within the album.
    pub index: Option<u32>,
    /// Album title to fall back on.
    pub album: Option<String>,
    /// Artist to fall back on.
    pub artist: Option<String>,
    /// Markup fetched earlier, saving a request.
    markup: Option<String>,
}

impl PendingTrack {
    /// Creates a new [`PendingTrack`] from its page URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            index: None,
            album: None,
            artist: None,
            markup: None,
        }
    }

    /// Attach the already fetched page markup.
    pub fn with_markup(mut self, markup: impl Into<String>) -> Self {
        self.markup = Some(markup.into());
        self
    }

    /// Set the position of the track within its album.
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }

    /// Set the album title and artist inherited from the parent album.
    pub fn with_parent(mut self, album: Option<String>, artist: Option<String>) -> Self {
        self.album = album;
        self.artist = artist;
        self
    }

    /// Return `true` if the page markup is already available.
    pub fn has_markup(&self) -> bool {
        self.markup.is_some()
    }

    /// Resolve the track, fetching its page unless markup was supplied.
    pub async fn resolve(mut self, fetcher: &PageFetcher) -> Result<Track> {
        let markup = match self.markup.take() {
            Some(markup) => markup,
            None => fetcher.fetch_markup(&self.url).await?,
        };
        self.resolve_with(&markup)
    }

    /// Resolve the track from the given markup.
    pub fn resolve_with(self, markup: &str) -> Result<Track> {
        let metadata = extract(markup, PageType::Track)?;

        let artwork_url = metadata
            .artwork_url
            .as_deref()
            .and_then(|link| join_link(&self.url, link));
        let audio_url = metadata
            .audio_url
            .as_deref()
            .and_then(|link| join_link(&self.url, link));

        Ok(Track {
            title: metadata.title,
            artist: metadata.artist.or(self.artist),
            album: metadata.album.or(self.album),
            index: self.index,
            artwork_url,
            audio_url,
            url: self.url,
        })
    }
}

/// Resolve a link found in a page against the page URL. Protocol-relative
/// links (`//host/path`) pick up the page scheme.
pub(crate) fn join_link(page: &Url, link: &str) -> Option<Url> {
    match page.join(link) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Ignoring malformed link {:?} on {}: {}", link, page, e);
            None
        }
    }
}

/// A resolved track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Page URL of the track.
    pub url: Url,
    /// Track title as shown on its page.
    pub title: String,
    /// Artist, from the track page or inherited from the album.
    pub artist: Option<String>,
    /// Album, from the track page or inherited from the album.
    pub album: Option<String>,
    /// 1-based position within the album.
    pub index: Option<u32>,
    /// Full size artwork.
    pub artwork_url: Option<Url>,
    /// Public audio stream. `None` when the track is not openly available.
    pub audio_url: Option<Url>,
}

impl Track {
    /// Composed display title, see [`format_title`].
    pub fn formatted_title(&self) -> String {
        format_title(
            &self.title,
            self.artist.as_deref(),
            self.album.as_deref(),
            self.index,
        )
    }

    /// Name of the audio file on disk.
    pub fn file_name(&self) -> String {
        audio_file_name(&self.formatted_title())
    }

    /// Return `true` if the track has a public audio stream.
    pub fn is_available(&self) -> bool {
        self.audio_url.is_some()
    }
}
