// crates/network/src/error.rs
//! Error types for network operations

use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Errors that can occur during network operations
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Download failed
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// Timeout
    #[error("Operation timed out")]
    Timeout,

    /// Custom error
    #[error("{0}")]
    Custom(String),
}

impl NetworkError {
    /// Returns true if the error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => (400..500).contains(status),
            NetworkError::Http(e) => e.status().is_some_and(|s| s.is_client_error()),
            _ => false,
        }
    }

    /// Returns true if the error is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        match self {
            NetworkError::Status { status, .. } => (500..600).contains(status),
            NetworkError::Http(e) => e.status().is_some_and(|s| s.is_server_error()),
            _ => false,
        }
    }

    /// Returns true if the request timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            NetworkError::Timeout => true,
            NetworkError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
