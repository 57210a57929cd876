// FILE: crates/content-sources/src/gutendex.rs

use crate::{
    infer_format, CatalogSource, SearchQuery, SourceError, SourceMetadata, SourceResult,
};
use bookfetch_config::SourcesConfig;
use bookfetch_core::{safe_filename, CatalogItem, FetchedArtifact, FileDescriptor, SourceKind};
use bookfetch_network::SharedTransport;
use serde::Deserialize;
use std::path::Path;

/// Project Gutenberg catalog through the Gutendex JSON API
///
/// The API filters by title only; author narrowing happens here, after the
/// first page of results comes back.
pub struct GutendexSource {
    transport: SharedTransport,
    base_url: String,
}

impl GutendexSource {
    pub fn new(transport: SharedTransport, config: &SourcesConfig) -> Self {
        Self {
            transport,
            base_url: config.gutendex_url.clone(),
        }
    }

    fn search_url(&self, title: &str) -> SourceResult<String> {
        url::Url::parse_with_params(&self.base_url, &[("search", title)])
            .map(String::from)
            .map_err(|e| SourceError::InvalidQuery(format!("{}: {}", self.base_url, e)))
    }

    /// Local file name: `<title> - <format>.<ext>`
    pub fn file_name(title: &str, format: bookfetch_core::DocumentFormat) -> String {
        format!(
            "{}.{}",
            safe_filename(&format!("{} - {}", title, format.tag())),
            format.extension()
        )
    }
}

impl CatalogSource for GutendexSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Gutenberg
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Project Gutenberg".to_string(),
            description: "Public domain ebooks via Gutendex".to_string(),
            base_url: self.base_url.clone(),
        }
    }

    fn search(&self, query: &SearchQuery) -> SourceResult<Vec<CatalogItem>> {
        let title = query.validated_title()?;
        let body = self.transport.get_text(&self.search_url(title)?)?;
        let page: GutendexPage = serde_json::from_str(&body)
            .map_err(|e| SourceError::ParseError(format!("JSON parse error: {}", e)))?;

        if page.next.is_some() {
            log::debug!("Gutendex has more results; only the first page is read");
        }

        let wanted = query.author.as_deref().map(str::to_lowercase);
        let items = page
            .results
            .into_iter()
            .filter(|book| match &wanted {
                Some(author) => book.has_author(author),
                None => true,
            })
            .map(GutendexBook::into_item)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        log::debug!("Gutendex returned {} matching books", items.len());
        Ok(items)
    }

    fn fetch(
        &self,
        item: &CatalogItem,
        file: &FileDescriptor,
        out_dir: &Path,
    ) -> SourceResult<FetchedArtifact> {
        let format = infer_format(file)?;
        let destination = out_dir.join(Self::file_name(item.display_title(), format));
        self.transport.download_to(&file.locator, &destination)?;
        Ok(FetchedArtifact::new(destination, format))
    }
}

#[derive(Debug, Deserialize)]
struct GutendexPage {
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    results: Vec<GutendexBook>,
}

#[derive(Debug, Deserialize)]
struct GutendexBook {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    authors: Vec<Person>,
    #[serde(default)]
    formats: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Person {
    #[serde(default)]
    name: String,
}

impl GutendexBook {
    /// Case-insensitive substring match against every listed author
    fn has_author(&self, wanted_lower: &str) -> bool {
        self.authors
            .iter()
            .any(|a| a.name.to_lowercase().contains(wanted_lower))
    }

    fn into_item(self) -> CatalogItem {
        let files = self
            .formats
            .iter()
            .filter_map(|(tag, url)| url.as_str().map(|u| FileDescriptor::new(tag.as_str(), u)))
            .collect();

        let creator = self
            .authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join("; ");

        let item = CatalogItem::new(self.id.to_string(), self.title).with_files(files);
        if creator.is_empty() {
            item
        } else {
            item.with_creator(creator)
        }
    }
}
