//! Output names for tracks, albums and artwork.

use crate::utils::text::{safe_file_name, safe_path};

use reqwest::Url;
use std::fmt::Write;

/// Separator between the lead part of a title and the rest of it.
pub const TITLE_SEPARATOR: &str = " - ";

/// Compose the display title of a track.
///
/// When the raw title already carries a lead part (`"Artist - Song"`) that
/// part is kept in front; otherwise the artist is put there. The album and the
/// track index follow when present.
///
/// # Example
///
/// ```rust
/// use campdown::catalog::format_title;
///
/// assert_eq!(format_title("Artist - Song", None, Some("LP"), Some(3)), "Artist - LP - 3 Song");
/// assert_eq!(format_title("Song", Some("Artist"), None, None), "Artist - Song");
/// ```
pub fn format_title(
    title: &str,
    artist: Option<&str>,
    album: Option<&str>,
    index: Option<u32>,
) -> String {
    let (lead, rest) = match title.split_once(TITLE_SEPARATOR) {
        Some((lead, rest)) => (Some(lead), rest),
        None => (artist.filter(|a| !a.is_empty()), title),
    };

    let mut composed = String::with_capacity(title.len() + 32);
    if let Some(lead) = lead {
        composed.push_str(lead);
        composed.push_str(TITLE_SEPARATOR);
    }
    if let Some(album) = album.filter(|a| !a.is_empty()) {
        composed.push_str(album);
        composed.push_str(TITLE_SEPARATOR);
    }
    if let Some(index) = index.filter(|i| *i > 0) {
        let _ = write!(composed, "{} ", index);
    }
    composed.push_str(rest);
    composed
}

/// File name of an audio file for a composed title.
pub fn audio_file_name(formatted_title: &str) -> String {
    format!("{}.mp3", safe_file_name(formatted_title))
}

/// Directory name of an album: `<artist> - <album>`.
pub fn album_directory_name(artist: Option<&str>, title: &str) -> String {
    match artist.filter(|a| !a.is_empty()) {
        Some(artist) => safe_path(&format!("{}{}{}", artist, TITLE_SEPARATOR, title)),
        None => safe_path(title),
    }
}

/// File name of the artwork: `cover` followed by the last four characters of
/// the artwork path, which hold its extension (`.jpg`, `.png`).
pub fn cover_file_name(artwork_url: &Url) -> String {
    let path = artwork_url.path();
    let skip = path.chars().count().saturating_sub(4);
    let extension: String = path.chars().skip(skip).collect();
    format!("cover{}", safe_file_name(&extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_title_with_lead() {
        assert_eq!(format_title("Artist - Song", Some("Other"), Some("LP"), Some(3)), "Artist - LP - 3 Song");
        assert_eq!(format_title("Artist - Song", None, Some("LP"), None), "Artist - LP - Song");
        assert_eq!(format_title("Artist - Song", None, None, Some(7)), "Artist - 7 Song");
        assert_eq!(format_title("Artist - Song", None, None, None), "Artist - Song");
    }

    #[test]
    fn test_format_title_splits_once() {
        assert_eq!(format_title("A - B - C", None, None, Some(1)), "A - 1 B - C");
    }

    #[test]
    fn test_format_title_without_lead() {
        assert_eq!(format_title("Song", Some("Artist"), None, None), "Artist - Song");
        assert_eq!(format_title("Song", Some("Artist"), Some("LP"), Some(2)), "Artist - LP - 2 Song");
        assert_eq!(format_title("Song", None, Some("LP"), Some(2)), "LP - 2 Song");
        assert_eq!(format_title("Song", Some(""), Some(""), Some(0)), "Song");
    }

    #[test]
    fn test_file_names() {
        assert_eq!(audio_file_name("AC/DC - Why?"), "ACDC - Why.mp3");
        assert_eq!(album_directory_name(Some("AC/DC"), "Live"), "AC&DC - Live");
        assert_eq!(album_directory_name(None, "Live"), "Live");
    }

    #[test]
    fn test_cover_file_name() {
        let url = Url::parse("https://f4.bcbits.com/img/a123_10.jpg").unwrap();
        assert_eq!(cover_file_name(&url), "cover.jpg");
        let url = Url::parse("https://f4.bcbits.com/img/a123_10.png?v=2").unwrap();
        assert_eq!(cover_file_name(&url), "cover.png");
    }
}
