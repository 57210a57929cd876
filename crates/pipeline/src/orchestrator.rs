// FILE: crates/pipeline/src/orchestrator.rs

use crate::artifact::{ArtifactOrigin, ProducedArtifact};
use crate::error::{PipelineError, PipelineResult};
use bookfetch_audiobook::AudiobookNormalizer;
use bookfetch_content_sources::{
    CatalogSource, FormatPreference, SearchQuery, StandardEbooksSource,
};
use bookfetch_conversion::ConverterChain;
use bookfetch_core::{CatalogItem, ConversionOutcome, DocumentFormat, FetchedArtifact, Request};
use log::{info, warn};

/// Resolves one request against every configured source
///
/// Runs sequentially: direct reference first, then catalog sources in
/// registry order, then the audiobook normalizer. Per-item and per-source
/// failures are logged and skipped.
pub struct Pipeline {
    pub(crate) sources: Vec<Box<dyn CatalogSource>>,
    pub(crate) direct: StandardEbooksSource,
    pub(crate) preference: FormatPreference,
    pub(crate) chain: ConverterChain,
    pub(crate) normalizer: AudiobookNormalizer,
    pub(crate) target: DocumentFormat,
}

impl Pipeline {
    pub fn target_format(&self) -> DocumentFormat {
        self.target
    }

    /// Names of the registered catalog sources, in the order they run
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.metadata().name).collect()
    }

    /// Runs the request; the only error is an unusable output directory
    pub fn run(&self, request: &Request) -> PipelineResult<Vec<ProducedArtifact>> {
        std::fs::create_dir_all(&request.output_dir).map_err(|source| PipelineError::OutputDir {
            path: request.output_dir.clone(),
            source,
        })?;

        let mut produced = Vec::new();

        if let Some(reference) = &request.reference {
            self.run_direct(reference, request, &mut produced);
        }

        if let Some(title) = request.search_title() {
            let mut query = SearchQuery::new(title);
            if let Some(author) = &request.author {
                query = query.with_author(author.as_str());
            }
            for source in self.sources.iter().filter(|s| request.wants(s.kind())) {
                self.run_source(source.as_ref(), &query, request, &mut produced);
            }
        }

        if let Some(spec) = &request.audiobook {
            let target = AudiobookNormalizer::target_in(spec, &request.output_dir);
            let outcome = self.normalizer.normalize(spec, &target);
            if let Some(path) = outcome.output() {
                produced.push(ProducedArtifact::new(path, self.target, ArtifactOrigin::Audiobook));
            }
        }

        if produced.is_empty() {
            info!("Run finished without producing any file");
        }
        Ok(produced)
    }

    fn run_direct(&self, reference: &str, request: &Request, produced: &mut Vec<ProducedArtifact>) {
        info!("Attempting Standard Ebooks download from {}", reference);
        match self.direct.fetch(reference, &request.output_dir) {
            Ok(artifact) => {
                info!("Downloaded Standard Ebooks file {}", artifact.path.display());
                produced.push(self.deliver(artifact, request, ArtifactOrigin::Direct));
            }
            Err(e) => warn!("Standard Ebooks download failed: {}", e),
        }
    }

    fn run_source(
        &self,
        source: &dyn CatalogSource,
        query: &SearchQuery,
        request: &Request,
        produced: &mut Vec<ProducedArtifact>,
    ) {
        let name = source.metadata().name;
        info!("Searching {}...", name);

        for item in source.locate(query) {
            info!("Found {} item: {} (id={})", name, item.display_title(), item.id);
            if let Some(artifact) = self.fetch_item(source, &item, request) {
                produced.push(self.deliver(artifact, request, ArtifactOrigin::Catalog(source.kind())));
            }
        }
    }

    fn fetch_item(
        &self,
        source: &dyn CatalogSource,
        item: &CatalogItem,
        request: &Request,
    ) -> Option<FetchedArtifact> {
        let Some(selection) = self.preference.select(&item.files) else {
            warn!("No downloadable format found for {}", item.display_title());
            return None;
        };
        info!("Best format: {} -> {}", selection.format, selection.file.locator);

        match source.fetch(item, selection.file, &request.output_dir) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                warn!("Download of {} failed: {}", selection.file.locator, e);
                None
            }
        }
    }

    /// Converts when asked and needed; otherwise, or on failure, keeps the original
    fn deliver(
        &self,
        artifact: FetchedArtifact,
        request: &Request,
        origin: ArtifactOrigin,
    ) -> ProducedArtifact {
        if !request.convert || artifact.format == self.target {
            return ProducedArtifact::from_fetched(artifact, origin);
        }

        let target = artifact.converted_path(self.target);
        match self.chain.convert(&artifact.path, artifact.format, &target) {
            ConversionOutcome::Converted { path, converter } => {
                info!("Converted to {} with {}: {}", self.target, converter, path.display());
                ProducedArtifact::new(path, self.target, origin)
            }
            ConversionOutcome::Failed => {
                warn!("Conversion failed; keeping {}", artifact.path.display());
                ProducedArtifact::from_fetched(artifact, origin)
            }
        }
    }
}
