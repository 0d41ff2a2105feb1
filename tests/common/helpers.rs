use std::fs;
use std::path::{Path, PathBuf};

use campdown::progress::{ProgressBarOpts, StyleOptions};
use campdown::{create_http_client, DownloaderBuilder, HttpClientConfig};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::ClientWithMiddleware;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// Common test constants
pub const TEST_USER_AGENT: &str = "campdown-test-agent";
pub const TEST_ARTIST: &str = "The Artist";
pub const TEST_ALBUM: &str = "First LP";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file exists at the given path
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file has the expected content
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at path: {:?}", path);
    assert!(content == expected, "File content mismatch at path: {:?}", path);
}

// === HTTP Helpers ===

/// Creates test headers with common user agent
pub fn create_test_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT));
    headers
}

/// Creates a client without retries, so refused requests are seen exactly once
pub fn create_test_client() -> ClientWithMiddleware {
    create_http_client(HttpClientConfig {
        retries: 0,
        proxy: None,
        headers: Some(create_test_headers()),
    })
    .expect("Failed to create HTTP client")
}

/// Creates a downloader builder writing into `dir`, with hidden bars and no retries
pub fn create_test_downloader_builder(dir: &Path) -> DownloaderBuilder {
    DownloaderBuilder::hidden()
        .directory(dir.to_path_buf())
        .retries(0)
        .headers(create_test_headers())
}

/// Serves a fixed body, honouring `Range: bytes=s-e` like a file host does
pub struct RangedResponder {
    body: Vec<u8>,
}

impl RangedResponder {
    pub fn new(body: Vec<u8>) -> Self {
        Self { body }
    }
}

impl Respond for RangedResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let total = self.body.len() as u64;
        let range = request
            .headers
            .get("range")
            .and_then(|value| value.to_str().ok())
            .and_then(parse_range);

        match range {
            Some((start, end)) if start < total => {
                let end = end.min(total - 1);
                ResponseTemplate::new(206)
                    .insert_header("content-range", format!("bytes {}-{}/{}", start, end, total))
                    .set_body_bytes(self.body[start as usize..=end as usize].to_vec())
            }
            Some(_) => ResponseTemplate::new(416),
            None => ResponseTemplate::new(200).set_body_bytes(self.body.clone()),
        }
    }
}

/// Parses a `bytes=s-e` header value
pub fn parse_range(value: &str) -> Option<(u64, u64)> {
    let (start, end) = value.strip_prefix("bytes=")?.split_once('-')?;
    Some((start.parse().ok()?, end.parse().ok()?))
}

/// Mounts a ranged file at `route`
pub async fn mount_file(server: &MockServer, route: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(RangedResponder::new(body))
        .mount(server)
        .await;
}

/// Mounts an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, markup: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(markup))
        .mount(server)
        .await;
}

/// Mounts a fixed status at `route`
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Requests received on `route`
pub async fn requests_to(server: &MockServer, route: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == route)
        .collect()
}

/// `Range` header values of the requests received on `route`, in order
pub async fn ranges_requested(server: &MockServer, route: &str) -> Vec<String> {
    requests_to(server, route)
        .await
        .iter()
        .filter_map(|request| request.headers.get("range"))
        .filter_map(|value| value.to_str().ok().map(String::from))
        .collect()
}

// === Markup Builders ===

/// Markup of a single track page.
///
/// `audio` of `None` produces a `"file":null` track information object.
pub fn track_page_markup(
    title: &str,
    album: Option<&str>,
    artwork: Option<&str>,
    audio: Option<&str>,
) -> String {
    let album = album
        .map(|album| format!("<span itemprop=\"name\">{}</span>", album))
        .unwrap_or_default();
    let artwork = artwork
        .map(|link| format!("<a class=\"popupImage\" href=\"{}\">", link))
        .unwrap_or_default();
    let file = match audio {
        Some(link) => format!("{{\"mp3-128\":\"{}\"}}", link),
        None => "null".to_string(),
    };

    format!(
        concat!(
            "<html><head>\n",
            "<meta name=\"Description\" content=\"\n{title} by {artist}, released 01 May 2020\">\n",
            "<meta property=\"og:site_name\" content=\"bandcamp.com\">\n",
            "</head><body>\n",
            "<script>var BandData = {{\n id: 1,\n name: \"{artist}\",\n}}</script>\n",
            "<h3>from {album}</h3>\n{artwork}</a>\n",
            "<li class=\"buyItem\">Digital Track</li>\n",
            "<script>var TralbumData = {{ trackinfo: [{{\"id\":7,\"file\":{file},\"title\":\"{title}\"}}], }};</script>\n",
            "</body></html>\n",
        ),
        title = title,
        artist = TEST_ARTIST,
        album = album,
        artwork = artwork,
        file = file,
    )
}

/// Markup of an album page listing `tracks` (paths below `/track`).
pub fn album_page_markup(title: &str, artwork: Option<&str>, tracks: &[&str]) -> String {
    let artwork = artwork
        .map(|link| format!("<a class=\"popupImage\" href=\"{}\">", link))
        .unwrap_or_default();
    let rows: String = tracks
        .iter()
        .map(|track| {
            format!(
                "<tr class=\"track_row_view\"><td class=\"title-col\"><a href=\"/track{}\"><span>{}</span></a></td></tr>\n",
                track, track
            )
        })
        .collect();

    format!(
        concat!(
            "<html><head>\n",
            "<meta name=\"Description\" content=\"\n{title} by {artist}, released 01 May 2020\">\n",
            "<meta property=\"og:site_name\" content=\"bandcamp.com\">\n",
            "</head><body>\n",
            "<script>var BandData = {{\n id: 1,\n name : \"{artist}\",\n}}</script>\n",
            "{artwork}</a>\n",
            "<li class=\"buyItem\">Digital Album</li>\n",
            "<table class=\"track_list track_table\" id=\"track_table\">\n",
            "<tr class=\"header\"><th>tracks</th></tr>\n",
            "{rows}</table>\n",
            "</body></html>\n",
        ),
        title = title,
        artist = TEST_ARTIST,
        artwork = artwork,
        rows = rows,
    )
}

// === Progress Bar Helpers ===

/// Creates default test progress bar options
pub fn create_test_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::new(None, None, true, false)
}

/// Creates hidden progress bar options for testing
pub fn create_hidden_progress_opts() -> ProgressBarOpts {
    ProgressBarOpts::hidden()
}

/// Creates custom progress bar options with template and chars
pub fn create_custom_progress_opts(template: &str, chars: &str) -> ProgressBarOpts {
    ProgressBarOpts::new(Some(template.to_string()), Some(chars.to_string()), true, false)
}

/// Creates default test style options
pub fn create_test_style_options() -> StyleOptions {
    StyleOptions::new(create_test_progress_opts(), ProgressBarOpts::with_transfer_style())
}

/// Creates disabled style options for testing
pub fn create_disabled_style_options() -> StyleOptions {
    StyleOptions::new(create_hidden_progress_opts(), create_hidden_progress_opts())
}

// === Assertion Helpers ===

/// Asserts that progress bar options are configured correctly
pub fn assert_progress_opts_enabled(opts: &ProgressBarOpts) {
    // Bars drawn to a non-terminal report as hidden, so check the length instead.
    let pb = opts.clone().to_progress_bar(100);
    assert_eq!(pb.length(), Some(100), "Progress bar should be enabled");
}

/// Asserts that progress bar options are disabled
pub fn assert_progress_opts_disabled(opts: &ProgressBarOpts) {
    let pb = opts.clone().to_progress_bar(100);
    assert!(pb.is_hidden(), "Progress bar should be disabled");
}
