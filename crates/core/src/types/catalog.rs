//! Catalog items and the files they offer

use serde::{Deserialize, Serialize};

/// One downloadable file under a catalog item; never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Free-text format tag as declared by the catalog ("PDF", "EPUB (old)")
    pub format: String,
    /// Declared size in bytes, if the catalog reports one
    pub size: Option<u64>,
    /// Source-specific file name or absolute URL
    pub locator: String,
}

impl FileDescriptor {
    pub fn new(format: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            size: None,
            locator: locator.into(),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Declared size with absent treated as zero
    pub fn size_or_zero(&self) -> u64 {
        self.size.unwrap_or(0)
    }
}

/// A located candidate; its identifier is only meaningful to the source
/// that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub creator: Option<String>,
    /// Full file catalog for the item
    pub files: Vec<FileDescriptor>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            creator: None,
            files: Vec::new(),
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    pub fn with_files(mut self, files: Vec<FileDescriptor>) -> Self {
        self.files = files;
        self
    }

    /// Title for display, falling back to the identifier
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}
