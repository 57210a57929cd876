//! Catalog endpoints

use crate::check::{Checker, Section};
use serde::{Deserialize, Serialize};

/// Base URLs and limits for each source adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourcesConfig {
    /// Internet Archive advanced search endpoint
    pub archive_search_url: String,

    /// Internet Archive per-identifier metadata endpoint
    pub archive_metadata_url: String,

    /// Internet Archive per-identifier download path
    pub archive_download_url: String,

    /// Rows requested from the archive search
    pub archive_rows: u32,

    pub gutendex_url: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            archive_search_url: "https://archive.org/advancedsearch.php".to_string(),
            archive_metadata_url: "https://archive.org/metadata".to_string(),
            archive_download_url: "https://archive.org/download".to_string(),
            archive_rows: 5,
            gutendex_url: "https://gutendex.com/books/".to_string(),
        }
    }
}

impl Section for SourcesConfig {
    const NAME: &'static str = "sources";

    fn check(&self, checker: &mut Checker<'_>) {
        checker.endpoint("archive_search_url", &self.archive_search_url);
        checker.endpoint("archive_metadata_url", &self.archive_metadata_url);
        checker.endpoint("archive_download_url", &self.archive_download_url);
        checker.range("archive_rows", self.archive_rows, 1..=100);
        checker.endpoint("gutendex_url", &self.gutendex_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SourcesConfig::default().problems().is_empty());
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let mut config = SourcesConfig::default();
        config.gutendex_url = "ftp://gutendex.com".to_string();
        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field, "sources.gutendex_url");
    }

    #[test]
    fn test_rows_range() {
        let mut config = SourcesConfig::default();
        config.archive_rows = 0;
        assert_eq!(config.problems()[0].field, "sources.archive_rows");
    }
}
