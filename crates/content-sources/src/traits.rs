// FILE: src/traits.rs
// ============================================================================

use crate::{SourceError, SourceResult};
use bookfetch_core::{last_segment, CatalogItem, DocumentFormat, FetchedArtifact, FileDescriptor, SourceKind};
use std::path::Path;

/// Catalog-search source: locate candidate items, then fetch one chosen file
///
/// Items returned by `search` are only meaningful to the same source's `fetch`.
pub trait CatalogSource: Send + Sync {
    /// Which registry entry this source is
    fn kind(&self) -> SourceKind;

    /// Get metadata about the source
    fn metadata(&self) -> SourceMetadata;

    /// Search for candidate items, surfacing failures
    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>>;

    /// Search for candidate items; failures are logged and yield no items
    fn locate(&self, query: &SearchQuery) -> Vec<CatalogItem> {
        match self.search(query) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("{} search failed: {}", self.metadata().name, e);
                Vec::new()
            }
        }
    }

    /// Download one file of a located item into `out_dir`
    fn fetch(
        &self,
        item: &CatalogItem,
        file: &FileDescriptor,
        out_dir: &Path,
    ) -> SourceResult<FetchedArtifact>;
}

/// Search query
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub title: String,
    pub author: Option<String>,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            limit: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = if author.trim().is_empty() {
            None
        } else {
            Some(author)
        };
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn validated_title(&self) -> SourceResult<&str> {
        let title = self.title.trim();
        if title.is_empty() {
            Err(SourceError::InvalidQuery("Empty title".to_string()))
        } else {
            Ok(title)
        }
    }
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub description: String,
    pub base_url: String,
}

/// Document format of a catalog file, from its declared tag or else its name
pub fn infer_format(file: &FileDescriptor) -> SourceResult<DocumentFormat> {
    DocumentFormat::all()
        .into_iter()
        .find(|f| f.matches_tag(&file.format))
        .or_else(|| DocumentFormat::from_path(Path::new(last_segment(&file.locator))))
        .ok_or_else(|| {
            SourceError::FormatUnavailable(format!("{} ({})", file.locator, file.format))
        })
}
