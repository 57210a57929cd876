// crates/network/src/stub.rs
//! Canned transport for exercising adapters without a network

use crate::error::{NetworkError, NetworkResult};
use crate::transport::HttpTransport;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Body(Vec<u8>),
    Status(u16),
}

/// Transport that answers from registered routes
///
/// A route matches when its key is a prefix of the requested URL; the
/// longest matching key wins. Unmatched URLs answer 404.
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: Vec<(String, Reply)>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    /// Creates a transport with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with a text body
    pub fn with_text(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.with_bytes(url, body.into().into_bytes())
    }

    /// Answers `url` with raw bytes
    pub fn with_bytes(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.routes.push((url.into(), Reply::Body(body.into())));
        self
    }

    /// Answers `url` with an HTTP error status
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.routes.push((url.into(), Reply::Status(status)));
        self
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn answer(&self, url: &str) -> NetworkResult<Vec<u8>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let reply = self
            .routes
            .iter()
            .filter(|(key, _)| url.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Status(404));

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(status) => Err(NetworkError::Status {
                url: url.to_string(),
                status,
            }),
        }
    }
}

impl HttpTransport for StubTransport {
    fn get_text(&self, url: &str) -> NetworkResult<String> {
        let body = self.answer(url)?;
        String::from_utf8(body).map_err(|e| NetworkError::Custom(format!("Invalid UTF-8: {}", e)))
    }

    fn download_to(&self, url: &str, destination: &Path) -> NetworkResult<u64> {
        let body = self.answer(url)?;
        crate::download::stream_to_file(body.as_slice(), destination, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        let stub = StubTransport::new()
            .with_text("https://archive.org/metadata/", "generic")
            .with_text("https://archive.org/metadata/abc", "specific");

        assert_eq!(
            stub.get_text("https://archive.org/metadata/abc").unwrap(),
            "specific"
        );
        assert_eq!(
            stub.get_text("https://archive.org/metadata/xyz").unwrap(),
            "generic"
        );
    }

    #[test]
    fn test_unknown_route_is_404() {
        let stub = StubTransport::new();
        let err = stub.get_text("https://example.org/").unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(stub.requests(), vec!["https://example.org/".to_string()]);
    }

    #[test]
    fn test_download_writes_and_failure_leaves_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let good = dir.path().join("dracula.epub");
        let bad = dir.path().join("missing.pdf");
        let stub = StubTransport::new()
            .with_bytes("https://example.org/dracula.epub", b"PK\x03\x04".to_vec())
            .with_status("https://example.org/missing", 503);

        assert_eq!(
            stub.download_to("https://example.org/dracula.epub", &good)
                .unwrap(),
            4
        );
        assert!(stub
            .download_to("https://example.org/missing.pdf", &bad)
            .is_err());
        assert!(!bad.exists());
    }

    #[test]
    fn test_status_route() {
        let stub = StubTransport::new().with_status("https://gutendex.com/", 500);
        assert!(stub
            .get_text("https://gutendex.com/books/?search=x")
            .unwrap_err()
            .is_server_error());
    }
}
