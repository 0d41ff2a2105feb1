//! Metadata extraction from raw page markup.

use super::rule::{ALBUM, ARTIST, ARTWORK, TITLE, TRACK_INFO};
use crate::error::Result;
use crate::page::PageType;

use serde::Deserialize;
use tracing::{debug, warn};

/// Fields extracted from one catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Track or album title. Always present.
    pub title: String,
    /// Artist name, if the page data block could be read.
    pub artist: Option<String>,
    /// Album the page belongs to. Standalone tracks may have none.
    pub album: Option<String>,
    /// Link to the full size artwork.
    pub artwork_url: Option<String>,
    /// Link to the public audio stream. Only read on track pages, and absent
    /// when the track is not openly streamable.
    pub audio_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackInfo {
    #[serde(default)]
    file: Option<StreamFiles>,
}

#[derive(Debug, Deserialize)]
struct StreamFiles {
    #[serde(rename = "mp3-128")]
    mp3_128: Option<String>,
}

/// Extract metadata from a page.
///
/// Only the title is required; every other field degrades to `None` with a
/// log line when its markers are missing.
///
/// # Example
///
/// ```rust
/// use campdown::extract::extract;
/// use campdown::page::PageType;
///
/// let markup = concat!(
///     "<meta name=\"Description\" content=\"\nA &amp; B by Artist\">",
///     "var BandData = {\n name: \"Artist\",\n}",
/// );
/// let metadata = extract(markup, PageType::Album)?;
/// assert_eq!(metadata.title, "A & B");
/// assert_eq!(metadata.artist.as_deref(), Some("Artist"));
/// # Ok::<(), campdown::Error>(())
/// ```
pub fn extract(markup: &str, page_type: PageType) -> Result<Metadata> {
    let title = TITLE.evaluate(markup)?.unwrap_or_default();

    let artist = ARTIST.evaluate(markup)?;
    if artist.is_none() {
        warn!("Failed to fetch the band/artist title for \"{}\"", title);
    }

    let album = ALBUM.evaluate(markup)?;
    if album.is_none() {
        debug!("No album name found for \"{}\"", title);
    }

    let artwork_url = ARTWORK.evaluate(markup)?;
    if artwork_url.is_none() {
        warn!("No artwork link found for \"{}\"", title);
    }

    let audio_url = match page_type {
        PageType::Track => extract_audio_url(markup, &title),
        _ => None,
    };

    Ok(Metadata {
        title,
        artist,
        album,
        artwork_url,
        audio_url,
    })
}

fn extract_audio_url(markup: &str, title: &str) -> Option<String> {
    let Some(raw) = TRACK_INFO.apply(markup) else {
        warn!("No track information found for \"{}\"", title);
        return None;
    };

    match parse_track_info(&raw) {
        Ok(Some(url)) => Some(url),
        Ok(None) => {
            debug!("\"{}\" has no public audio stream", title);
            None
        }
        Err(e) => {
            warn!("Failed to read the track information for \"{}\": {}", title, e);
            None
        }
    }
}

/// Parse the body of an embedded track information object and return its
/// `file.mp3-128` stream link.
///
/// The markup carries the object without its enclosing braces, so they are
/// put back before decoding. A `null` (or absent) `file` field means the track
/// is not streamable and yields `Ok(None)`.
pub fn parse_track_info(raw: &str) -> Result<Option<String>> {
    let wrapped = format!("{{{}}}", raw);
    let info: TrackInfo = serde_json::from_str(&wrapped)?;
    Ok(info
        .file
        .and_then(|files| files.mp3_128)
        .filter(|url| !url.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_track_info() {
        let raw = r#""id":1,"file":{"mp3-128":"https://t4.bcbits.com/stream/abc"},"title":"Song""#;
        assert_eq!(
            parse_track_info(raw).unwrap().as_deref(),
            Some("https://t4.bcbits.com/stream/abc")
        );
    }

    #[test]
    fn test_parse_track_info_null_file() {
        assert_eq!(parse_track_info(r#""id":1,"file":null"#).unwrap(), None);
        assert_eq!(parse_track_info(r#""id":1"#).unwrap(), None);
    }

    #[test]
    fn test_parse_track_info_malformed() {
        let err = parse_track_info(r#""id":"#).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }

    #[test]
    fn test_audio_only_read_on_track_pages() {
        let markup = concat!(
            "<meta name=\"Description\" content=\"\nSong by Artist\">",
            "trackinfo: [{\"file\":{\"mp3-128\":\"//stream/x\"}}],"
        );
        let track = extract(markup, PageType::Track).unwrap();
        let album = extract(markup, PageType::Album).unwrap();
        assert_eq!(track.audio_url.as_deref(), Some("//stream/x"));
        assert_eq!(album.audio_url, None);
    }

    #[test]
    fn test_missing_title_is_fatal() {
        let err = extract("var BandData = {\n name: \"Artist\",\n}", PageType::Track).unwrap_err();
        assert!(matches!(err, Error::Extraction(_)));
    }
}
