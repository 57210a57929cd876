// FILE: crates/content-sources/src/lib.rs

mod archive;
mod gutendex;
mod selector;
mod standard_ebooks;
mod traits;

pub use archive::ArchiveSource;
pub use gutendex::GutendexSource;
pub use selector::{select, FormatPreference, PreferenceRule, Selection, TieBreak};
pub use standard_ebooks::{ResolvedLink, StandardEbooksSource};
use std::fmt;
pub use traits::{infer_format, CatalogSource, SearchQuery, SourceMetadata};

use bookfetch_network::NetworkError;

/// Result type for content source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors from content sources
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Network error
    NetworkError(String),
    /// Parse error
    ParseError(String),
    /// Not found
    NotFound,
    /// Invalid query
    InvalidQuery(String),
    /// No download link could be found on a page
    LinkNotFound(String),
    /// The chosen file has no recognizable document format
    FormatUnavailable(String),
    /// Local file error while storing a download
    Io(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NetworkError(e) => write!(f, "Network error: {}", e),
            SourceError::ParseError(e) => write!(f, "Parse error: {}", e),
            SourceError::NotFound => write!(f, "Not found"),
            SourceError::InvalidQuery(e) => write!(f, "Invalid query: {}", e),
            SourceError::LinkNotFound(page) => {
                write!(f, "Could not find EPUB download link on {}", page)
            }
            SourceError::FormatUnavailable(e) => write!(f, "No usable format: {}", e),
            SourceError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SourceError {}

impl From<NetworkError> for SourceError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::Io(e) => SourceError::Io(e.to_string()),
            NetworkError::InvalidUrl(url) => SourceError::InvalidQuery(format!("invalid URL {}", url)),
            other => SourceError::NetworkError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::NotFound;
        assert!(err.to_string().contains("Not found"));

        let err = SourceError::LinkNotFound("https://standardebooks.org/ebooks/x".to_string());
        assert!(err.to_string().contains("standardebooks.org"));
    }

    #[test]
    fn test_network_error_conversion() {
        let err: SourceError = NetworkError::Status {
            url: "https://archive.org/metadata/x".to_string(),
            status: 502,
        }
        .into();
        assert!(matches!(err, SourceError::NetworkError(ref m) if m.contains("502")));
    }
}
