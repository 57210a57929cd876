// crates/network/src/lib.rs
//! Network utilities for HTTP requests and downloads

mod client;
mod download;
mod error;
mod progress;
#[cfg(any(test, feature = "test-support"))]
mod stub;
mod transport;

pub use client::{Client, ClientConfig};
pub use download::stream_to_file;
pub use error::{NetworkError, NetworkResult};
pub use progress::{DownloadProgress, ProgressTracker};
#[cfg(any(test, feature = "test-support"))]
pub use stub::StubTransport;
pub use transport::{HttpTransport, SharedTransport};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_all_exports_accessible() {
        let client = Client::new().expect("Failed to create client");
        let _: Arc<dyn HttpTransport + Send + Sync> = Arc::new(client);
        let _: ProgressTracker = ProgressTracker::new(Some(1000));
    }
}
