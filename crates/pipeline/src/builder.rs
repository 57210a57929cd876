//! Wiring configured, capability-checked parts into a [`Pipeline`]

use crate::error::PipelineResult;
use crate::orchestrator::Pipeline;
use bookfetch_audiobook::{AudiobookNormalizer, Transcriber, WhisperCommand};
use bookfetch_config::Config;
use bookfetch_content_sources::{
    ArchiveSource, CatalogSource, FormatPreference, GutendexSource, StandardEbooksSource,
};
use bookfetch_conversion::{ConverterChain, DocumentRenderer, PdfRenderer};
use bookfetch_core::DocumentFormat;
use bookfetch_network::{Client, ClientConfig, SharedTransport};
use std::sync::Arc;

/// Builds a pipeline from configuration; every part can be replaced before `build`
pub struct PipelineBuilder {
    config: Config,
    transport: Option<SharedTransport>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    transcriber: Option<Arc<dyn Transcriber>>,
    preference: FormatPreference,
}

impl PipelineBuilder {
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.clone(),
            transport: None,
            renderer: None,
            transcriber: None,
            preference: FormatPreference::default(),
        }
    }

    pub fn with_transport(mut self, transport: SharedTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    pub fn with_preference(mut self, preference: FormatPreference) -> Self {
        self.preference = preference;
        self
    }

    fn client_config(&self) -> ClientConfig {
        let network = &self.config.network;
        ClientConfig::default()
            .with_timeout(network.timeout())
            .with_user_agent(network.user_agent.as_str())
            .with_max_redirects(network.max_redirects)
    }

    pub fn build(self) -> PipelineResult<Pipeline> {
        let transport: SharedTransport = match &self.transport {
            Some(transport) => transport.clone(),
            None => Arc::new(Client::with_config(self.client_config())?),
        };
        let renderer: Arc<dyn DocumentRenderer> = match &self.renderer {
            Some(renderer) => renderer.clone(),
            None => Arc::new(PdfRenderer::new()),
        };
        let transcriber: Arc<dyn Transcriber> = match &self.transcriber {
            Some(transcriber) => transcriber.clone(),
            None => Arc::new(WhisperCommand::from_config(&self.config.conversion)),
        };

        let sources: Vec<Box<dyn CatalogSource>> = vec![
            Box::new(ArchiveSource::new(transport.clone(), &self.config.sources)),
            Box::new(GutendexSource::new(transport.clone(), &self.config.sources)),
        ];

        let chain = ConverterChain::from_config(&self.config.conversion, renderer.clone());
        log::debug!("Converter order: {:?}", chain.names());

        Ok(Pipeline {
            sources,
            direct: StandardEbooksSource::new(transport),
            preference: self.preference,
            chain,
            normalizer: AudiobookNormalizer::new(transcriber, renderer),
            target: DocumentFormat::Pdf,
        })
    }
}
