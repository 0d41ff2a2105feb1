//! Page type detection.

use std::fmt;

/// Token present on every page served by the catalog host.
pub const CATALOG_MARKER: &str = "bandcamp.com";
/// Present only on pages selling a single track.
pub const TRACK_MARKER: &str = "Digital Track";
/// Present on pages selling a whole album.
pub const ALBUM_MARKER: &str = "Digital Album";
/// Class of the album track listing table.
pub const TRACK_LIST_MARKER: &str = "track_list";
/// Id of the discography section on artist pages.
pub const DISCOGRAPHY_MARKER: &str = "id=\"discography\"";

/// The kind of catalog page a piece of markup describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    /// A single track page.
    Track,
    /// An album page with a track listing.
    Album,
    /// An artist's discography page. Recognized, but not downloadable.
    Discography,
    /// A catalog page of no known type.
    Unknown,
    /// Not a catalog page at all.
    NotRecognized,
}

impl PageType {
    /// Return `true` for the page types the downloader knows how to process.
    pub fn is_downloadable(&self) -> bool {
        matches!(self, PageType::Track | PageType::Album)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageType::Track => "track",
            PageType::Album => "album",
            PageType::Discography => "discography",
            PageType::Unknown => "unknown",
            PageType::NotRecognized => "not recognized",
        };
        f.write_str(name)
    }
}

/// Classify raw page markup.
///
/// Markers are tested from the most specific to the least specific, since album
/// pages routinely mention tracks and track pages may carry a track list.
///
/// # Example
///
/// ```rust
/// use campdown::page::{classify, PageType};
///
/// let markup = "<html>bandcamp.com ... Digital Track ... track_list</html>";
/// assert_eq!(classify(markup), PageType::Track);
/// assert_eq!(classify("<html>example.org</html>"), PageType::NotRecognized);
/// ```
pub fn classify(markup: &str) -> PageType {
    if !markup.contains(CATALOG_MARKER) {
        return PageType::NotRecognized;
    }

    if markup.contains(TRACK_MARKER) {
        PageType::Track
    } else if markup.contains(ALBUM_MARKER) && markup.contains(TRACK_LIST_MARKER) {
        PageType::Album
    } else if !markup.contains(DISCOGRAPHY_MARKER) {
        PageType::Discography
    } else {
        PageType::Unknown
    }
}
