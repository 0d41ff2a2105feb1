//! Tests for the downloader module functionality.
//!
//! This file covers the Downloader accessors and the DownloaderBuilder pattern.
//! End to end runs live in `integration_tests.rs`.

use campdown::downloader::{default_directory, DownloaderBuilder};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

mod common;
use common::helpers::*;

#[test]
fn test_builder_defaults() {
    let downloader = DownloaderBuilder::new().build();

    assert_eq!(downloader.directory(), &default_directory());
    assert_eq!(downloader.retries(), 3);
    assert_eq!(downloader.concurrent_downloads(), 1);
    assert!(!downloader.use_range_for_content_length());
    assert!(!downloader.force());
    assert!(downloader.headers().is_none());
}

#[test]
fn test_builder_configuration() {
    let temp_dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .directory(temp_dir.path().to_path_buf())
        .retries(5)
        .concurrent_downloads(4)
        .use_range_for_content_length(true)
        .force(true)
        .build();

    assert_eq!(downloader.directory(), temp_dir.path());
    assert_eq!(downloader.retries(), 5);
    assert_eq!(downloader.concurrent_downloads(), 4);
    assert!(downloader.use_range_for_content_length());
    assert!(downloader.force());
}

#[test]
fn test_builder_clamps_concurrency() {
    let downloader = DownloaderBuilder::new().concurrent_downloads(0).build();
    assert_eq!(downloader.concurrent_downloads(), 1);
}

#[test]
fn test_builder_headers_are_merged() {
    let downloader = DownloaderBuilder::new()
        .headers(create_test_headers())
        .headers(HeaderMap::from_iter([(ACCEPT, HeaderValue::from_static("text/html"))]))
        .build();

    let headers = downloader.headers().unwrap();
    assert_eq!(
        headers.get(USER_AGENT),
        Some(&HeaderValue::from_static(TEST_USER_AGENT))
    );
    assert_eq!(headers.get(ACCEPT), Some(&HeaderValue::from_static("text/html")));
}

#[test]
fn test_builder_single_header_overrides() {
    let downloader = DownloaderBuilder::new()
        .headers(create_test_headers())
        .header(USER_AGENT, HeaderValue::from_static("single-test-agent"))
        .build();

    assert_eq!(
        downloader.headers().unwrap().get(USER_AGENT),
        Some(&HeaderValue::from_static("single-test-agent"))
    );
}

#[test]
fn test_builder_hidden_keeps_defaults() {
    let downloader = DownloaderBuilder::hidden().build();

    assert_eq!(downloader.retries(), 3);
    assert_eq!(downloader.concurrent_downloads(), 1);
}

#[test]
fn test_downloader_debug_hides_callback() {
    let downloader = DownloaderBuilder::new().on_complete(|_| {}).build();
    let debug_str = format!("{:?}", downloader);

    assert!(debug_str.contains("Downloader"));
    assert!(debug_str.contains("on_complete: true"));
}

#[test]
fn test_downloader_clone() {
    let downloader = DownloaderBuilder::new().retries(7).build();
    let cloned = downloader.clone();

    assert_eq!(downloader.retries(), cloned.retries());
    assert_eq!(downloader.directory(), cloned.directory());
}
