// FILE: src/archive.rs
// ============================================================================

use crate::{
    infer_format, CatalogSource, SearchQuery, SourceError, SourceMetadata, SourceResult,
};
use bookfetch_config::SourcesConfig;
use bookfetch_core::{safe_filename, CatalogItem, FetchedArtifact, FileDescriptor, SourceKind};
use bookfetch_network::SharedTransport;
use serde::Deserialize;
use std::path::Path;

/// Internet Archive content source
///
/// Locating is two-step: an advanced search for identifiers, then one
/// metadata lookup per identifier for its file list.
pub struct ArchiveSource {
    transport: SharedTransport,
    search_url: String,
    metadata_url: String,
    download_url: String,
    rows: usize,
}

impl ArchiveSource {
    pub fn new(transport: SharedTransport, config: &SourcesConfig) -> Self {
        Self {
            transport,
            search_url: config.archive_search_url.clone(),
            metadata_url: config.archive_metadata_url.trim_end_matches('/').to_string(),
            download_url: config.archive_download_url.trim_end_matches('/').to_string(),
            rows: config.archive_rows as usize,
        }
    }

    /// Builds the fielded search query, e.g. `title:("Emma") AND creator:("Austen")`
    pub fn build_query(title: &str, author: Option<&str>) -> String {
        let mut q = format!("title:(\"{}\")", title);
        if let Some(author) = author {
            q.push_str(&format!(" AND creator:(\"{}\")", author));
        }
        q
    }

    fn search_url(&self, query: &SearchQuery, title: &str) -> SourceResult<String> {
        let rows = query.limit.unwrap_or(self.rows).to_string();
        let q = Self::build_query(title, query.author.as_deref());
        url::Url::parse_with_params(
            &self.search_url,
            &[
                ("q", q.as_str()),
                ("fl", "identifier,title,creator"),
                ("rows", rows.as_str()),
                ("output", "json"),
            ],
        )
        .map(String::from)
        .map_err(|e| SourceError::InvalidQuery(format!("{}: {}", self.search_url, e)))
    }

    /// Appends each segment to `base` as its own percent-encoded path segment
    ///
    /// Archive file names are raw names, so `#`, `?` and spaces belong to the
    /// path; a `/` inside a locator separates directories.
    fn item_url<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> SourceResult<String> {
        let mut url = url::Url::parse(base)
            .map_err(|e| SourceError::InvalidQuery(format!("{}: {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidQuery(format!("{} cannot carry a path", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.to_string())
    }

    /// Fetches the file list for one identifier
    pub fn files(&self, identifier: &str) -> SourceResult<Vec<FileDescriptor>> {
        let url = Self::item_url(&self.metadata_url, [identifier])?;
        let body = self.transport.get_text(&url)?;
        let metadata: MetadataResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::ParseError(format!("metadata for {}: {}", identifier, e)))?;

        Ok(metadata
            .files
            .into_iter()
            .filter_map(ArchiveFile::into_descriptor)
            .collect())
    }
}

impl CatalogSource for ArchiveSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Archive
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Internet Archive".to_string(),
            description: "Digitized books with PDF, EPUB and scan formats".to_string(),
            base_url: self.search_url.clone(),
        }
    }

    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>> {
        let title = query.validated_title()?;
        let url = self.search_url(query, title)?;
        let body = self.transport.get_text(&url)?;
        let response: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::ParseError(format!("JSON parse error: {}", e)))?;

        let mut items = Vec::new();
        for doc in response.response.docs {
            let Some(identifier) = doc.identifier else {
                continue;
            };

            let files = match self.files(&identifier) {
                Ok(files) => files,
                Err(e) => {
                    log::warn!("Skipping Internet Archive item {}: {}", identifier, e);
                    continue;
                }
            };

            let title = doc.title.map(OneOrMany::joined).unwrap_or_default();
            let mut item = CatalogItem::new(identifier, title).with_files(files);
            if let Some(creator) = doc.creator.map(OneOrMany::joined) {
                item = item.with_creator(creator);
            }
            items.push(item);
        }

        log::debug!("Internet Archive returned {} items", items.len());
        Ok(items)
    }

    fn fetch(
        &self,
        item: &CatalogItem,
        file: &FileDescriptor,
        out_dir: &Path,
    ) -> SourceResult<FetchedArtifact> {
        let format = infer_format(file)?;
        let segments = std::iter::once(item.id.as_str()).chain(file.locator.split('/'));
        let url = Self::item_url(&self.download_url, segments)?;
        let name = safe_filename(file.locator.rsplit('/').next().unwrap_or_default());
        if name.is_empty() {
            return Err(SourceError::FormatUnavailable(file.locator.clone()));
        }

        let destination = out_dir.join(name);
        self.transport.download_to(&url, &destination)?;
        Ok(FetchedArtifact::new(destination, format))
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    response: SearchDocs,
}

#[derive(Debug, Default, Deserialize)]
struct SearchDocs {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    identifier: Option<String>,
    #[serde(default)]
    title: Option<OneOrMany>,
    #[serde(default)]
    creator: Option<OneOrMany>,
}

/// Archive fields that are a string for one value and a list for several
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn joined(self) -> String {
        match self {
            OneOrMany::One(s) => s,
            OneOrMany::Many(v) => v.join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MetadataResponse {
    #[serde(default)]
    files: Vec<ArchiveFile>,
}

#[derive(Debug, Deserialize)]
struct ArchiveFile {
    name: Option<String>,
    #[serde(default)]
    format: Option<String>,
    #[serde(default)]
    size: Option<SizeField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SizeField {
    Number(u64),
    Text(String),
}

impl ArchiveFile {
    fn into_descriptor(self) -> Option<FileDescriptor> {
        let name = self.name?;
        let descriptor = FileDescriptor::new(self.format.unwrap_or_default(), name);
        let size = match self.size {
            Some(SizeField::Number(n)) => Some(n),
            Some(SizeField::Text(s)) => s.trim().parse().ok(),
            None => None,
        };
        Some(match size {
            Some(size) => descriptor.with_size(size),
            None => descriptor,
        })
    }
}
