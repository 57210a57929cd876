// crates/network/src/transport.rs
//! The seam every source adapter talks HTTP through

use crate::error::NetworkResult;
use std::path::Path;

/// Blocking HTTP operations the catalog adapters need
///
/// Implementations must treat any non-2xx status as an error.
pub trait HttpTransport {
    /// GETs a URL and returns the body as text
    fn get_text(&self, url: &str) -> NetworkResult<String>;

    /// GETs a URL and streams the body into `destination`, returning the byte count
    fn download_to(&self, url: &str, destination: &Path) -> NetworkResult<u64>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn get_text(&self, url: &str) -> NetworkResult<String> {
        (**self).get_text(url)
    }

    fn download_to(&self, url: &str, destination: &Path) -> NetworkResult<u64> {
        (**self).download_to(url, destination)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    fn get_text(&self, url: &str) -> NetworkResult<String> {
        (**self).get_text(url)
    }

    fn download_to(&self, url: &str, destination: &Path) -> NetworkResult<u64> {
        (**self).download_to(url, destination)
    }
}

/// Transport handle shared by every adapter in one pipeline
pub type SharedTransport = std::sync::Arc<dyn HttpTransport + Send + Sync>;
