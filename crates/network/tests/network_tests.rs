// crates/network/tests/network_tests.rs
//! Integration tests for network module

use bookfetch_network::{
    stream_to_file, Client, ClientConfig, HttpTransport, NetworkError, ProgressTracker,
};
use std::time::Duration;
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_client_with_custom_config() {
    let config = ClientConfig::default()
        .with_timeout(Duration::from_secs(10))
        .with_user_agent("TestClient/1.0");

    let client = Client::with_config(config);
    assert!(client.is_ok());
}

#[test]
fn test_progress_tracker_with_stream() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("out.bin");
    let tracker = ProgressTracker::new(Some(10));

    stream_to_file(&b"0123456789"[..], &dest, Some(&tracker)).unwrap();
    assert_eq!(tracker.percentage(), Some(100.0));
}

#[test]
fn test_status_error_surfaces_code() {
    let err = NetworkError::Status {
        url: "https://archive.org/metadata/none".to_string(),
        status: 404,
    };
    assert!(err.is_client_error());
    assert!(err.to_string().contains("404"));
}

#[test]
#[ignore = "Requires network access"]
fn test_live_download() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let client = Client::new().unwrap();
    let written = client
        .download_to(
            "https://www.rust-lang.org/robots.txt",
            &dir.path().join("robots.txt"),
        )
        .unwrap();
    assert!(written > 0);
}
