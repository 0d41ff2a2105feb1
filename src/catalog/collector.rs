//! Track listing collection for album pages.

use super::track::PendingTrack;
use crate::utils::text::{scan_until, slice_between};

use reqwest::Url;
use tracing::{debug, warn};

/// Id attribute of the track listing table.
pub const TRACK_TABLE_ID: &str = "id=\"track_table\"";
/// Closing tag of the track listing table.
pub const TRACK_TABLE_END: &str = "</table>";
/// Start of every table row.
pub const ROW_START: &str = "<tr";
/// Anchor prefix of a link to a track page.
pub const TRACK_LINK_PREFIX: &str = "<a href=\"/track";

/// Return the content of the track listing table, if the page has one.
pub fn track_table(markup: &str) -> Option<&str> {
    let table = slice_between(markup, TRACK_TABLE_ID, TRACK_TABLE_END)?;
    // Skip whatever is left of the opening tag.
    let content_start = table.find('>').map(|i| i + 1).unwrap_or(0);
    Some(&table[content_start..])
}

/// Recover the track path suffix of one table row (`/song-title`).
///
/// Rows without a track link, or whose link never closes, yield `None`, and
/// so does an empty suffix.
pub fn row_track_suffix(row: &str) -> Option<&str> {
    let from = row.find(TRACK_LINK_PREFIX)? + TRACK_LINK_PREFIX.len();
    scan_until(row, from, '"').filter(|suffix| !suffix.is_empty())
}

/// Collect the tracks listed on an album page, in listing order.
///
/// Each accepted row gets the next 1-based index; rows without a usable
/// track link consume no index. The result is unresolved: URL and index only.
pub fn collect_tracks(markup: &str, base_url: &str) -> Vec<PendingTrack> {
    let Some(table) = track_table(markup) else {
        warn!("No track listing table found on the album page");
        return Vec::new();
    };

    let mut tracks = Vec::new();
    for row in table.split(ROW_START) {
        let Some(suffix) = row_track_suffix(row) else {
            continue;
        };

        let link = format!("{}/track{}", base_url, suffix);
        let url = match Url::parse(&link) {
            Ok(url) => url,
            Err(e) => {
                warn!("Skipping track with malformed link {:?}: {}", link, e);
                continue;
            }
        };

        let index = tracks.len() as u32 + 1;
        debug!(index, "Found track {}", url);
        tracks.push(PendingTrack::new(url).with_index(index));
    }

    tracks
}

/// Scheme and host (with port) of a URL, used to resolve track links.
pub fn base_url(url: &Url) -> String {
    url.origin().ascii_serialization()
}
