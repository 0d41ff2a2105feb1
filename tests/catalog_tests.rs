//! Tests for page classification, metadata extraction and album resolution
//! on full page markup.

use std::time::Duration;

use campdown::catalog::{collect_tracks, Album, PendingTrack};
use campdown::extract::extract;
use campdown::http::PageFetcher;
use campdown::page::{classify, PageType};
use campdown::Error;
use reqwest::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[test]
fn test_classify_generated_pages() {
    let track = track_page_markup("Song", None, None, Some("https://t4.bcbits.com/stream/1"));
    let album = album_page_markup(TEST_ALBUM, None, &["/a"]);

    assert_eq!(classify(&track), PageType::Track);
    assert_eq!(classify(&album), PageType::Album);
}

#[test]
fn test_track_marker_wins_over_album_markers() {
    let markup = format!("{}<p>Digital Track</p>", album_page_markup(TEST_ALBUM, None, &["/a"]));
    assert_eq!(classify(&markup), PageType::Track);
}

#[test]
fn test_extract_track_page() {
    let markup = track_page_markup(
        "Rock &amp; Roll",
        Some(TEST_ALBUM),
        Some("https://f4.bcbits.com/img/a1_10.jpg"),
        Some("https://t4.bcbits.com/stream/1"),
    );
    let metadata = extract(&markup, PageType::Track).unwrap();

    assert_eq!(metadata.title, "Rock & Roll");
    assert_eq!(metadata.artist.as_deref(), Some(TEST_ARTIST));
    assert_eq!(metadata.album.as_deref(), Some(TEST_ALBUM));
    assert_eq!(
        metadata.artwork_url.as_deref(),
        Some("https://f4.bcbits.com/img/a1_10.jpg")
    );
    assert_eq!(
        metadata.audio_url.as_deref(),
        Some("https://t4.bcbits.com/stream/1")
    );
}

#[test]
fn test_track_without_stream_resolves_unavailable() {
    let markup = track_page_markup("Song", None, None, None);
    let url = Url::parse("https://artist.bandcamp.com/track/song").unwrap();
    let track = PendingTrack::new(url).resolve_with(&markup).unwrap();

    assert_eq!(track.audio_url, None);
    assert!(!track.is_available());
}

#[test]
fn test_page_without_title_fails_extraction() {
    let result = extract("<html>bandcamp.com Digital Track</html>", PageType::Track);
    assert!(matches!(result, Err(Error::Extraction(_))));
}

#[test]
fn test_collect_tracks_from_album_page() {
    let markup = album_page_markup(TEST_ALBUM, None, &["/intro", "/outro"]);
    let tracks = collect_tracks(&markup, "https://artist.bandcamp.com");

    let urls: Vec<_> = tracks.iter().map(|t| t.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://artist.bandcamp.com/track/intro",
            "https://artist.bandcamp.com/track/outro"
        ]
    );
    assert_eq!(tracks[1].index, Some(2));
}

#[tokio::test]
async fn test_album_resolution_keeps_listing_order() {
    let server = MockServer::start().await;
    let album_markup = album_page_markup(TEST_ALBUM, None, &["/slow", "/fast", "/missing"]);

    // The first track answers last; the queue must still start with it.
    Mock::given(method("GET"))
        .and(path("/track/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(track_page_markup("Slow", None, None, None))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mount_page(
        &server,
        "/track/fast",
        track_page_markup("Fast", Some("Single"), None, None),
    )
    .await;
    mount_status(&server, "/track/missing", 404).await;

    let fetcher = PageFetcher::new(create_test_client());
    let url = Url::parse(&format!("{}/album/lp", server.uri())).unwrap();
    let album = Album::resolve(&fetcher, url, Some(album_markup), 3)
        .await
        .unwrap();

    assert_eq!(album.title, TEST_ALBUM);
    assert_eq!(album.artist.as_deref(), Some(TEST_ARTIST));
    assert_eq!(album.directory_name(), "The Artist - First LP");

    let titles: Vec<_> = album.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Slow", "Fast"]);
    assert_eq!(album.tracks[0].index, Some(1));
    assert_eq!(album.tracks[1].index, Some(2));

    // Parent values only fill what the track page leaves out.
    assert_eq!(album.tracks[0].album.as_deref(), Some(TEST_ALBUM));
    assert_eq!(album.tracks[1].album.as_deref(), Some("Single"));

    assert_eq!(album.failures.len(), 1);
    assert_eq!(album.failures[0].index, Some(3));
    assert!(matches!(album.failures[0].error, Error::Fetch { .. }));

    // The album page markup was supplied, so it was never requested.
    assert!(requests_to(&server, "/album/lp").await.is_empty());
}
