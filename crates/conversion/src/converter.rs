//! Converter contract and the ordered fallback chain

use crate::builtin::BuiltinConverter;
use crate::error::ConversionResult;
use crate::external::ExternalConverter;
use crate::render::DocumentRenderer;
use bookfetch_config::{ConversionConfig, ConverterKind};
use bookfetch_core::{ConversionOutcome, DocumentFormat};
use std::path::Path;
use std::sync::Arc;

/// One interchangeable conversion strategy
///
/// A converter writes only to `target`. A failed attempt may leave a partial
/// file there; the next converter overwrites it.
pub trait Converter: Send + Sync {
    fn name(&self) -> &str;

    /// Checked at call time
    fn is_available(&self) -> bool;

    fn supports(&self, format: DocumentFormat) -> bool;

    /// `format` is what the caller knows `source` to be; file names are not consulted
    fn convert(&self, source: &Path, format: DocumentFormat, target: &Path) -> ConversionResult<()>;
}

/// Converters tried in declared order until one succeeds
pub struct ConverterChain {
    converters: Vec<Box<dyn Converter>>,
}

impl ConverterChain {
    pub fn new(converters: Vec<Box<dyn Converter>>) -> Self {
        Self { converters }
    }

    /// Builds the chain in the configured order
    pub fn from_config(config: &ConversionConfig, renderer: Arc<dyn DocumentRenderer>) -> Self {
        let converters = config
            .converter_order
            .iter()
            .map(|kind| -> Box<dyn Converter> {
                match kind {
                    ConverterKind::EbookConvert => {
                        Box::new(ExternalConverter::ebook_convert(&config.ebook_convert_command))
                    }
                    ConverterKind::Pandoc => {
                        Box::new(ExternalConverter::pandoc(&config.pandoc_command))
                    }
                    ConverterKind::Builtin => Box::new(BuiltinConverter::new(renderer.clone())),
                }
            })
            .collect();
        Self::new(converters)
    }

    pub fn names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    /// Converts `source` into `target`; never fails, reports `Failed` instead
    pub fn convert(
        &self,
        source: &Path,
        format: DocumentFormat,
        target: &Path,
    ) -> ConversionOutcome {
        for converter in &self.converters {
            let name = converter.name();
            if !converter.supports(format) {
                log::debug!("{} does not read {}", name, format);
                continue;
            }
            if !converter.is_available() {
                log::info!("{} is not available, trying next converter", name);
                continue;
            }

            log::info!("Converting {} with {}", source.display(), name);
            match converter.convert(source, format, target) {
                Ok(()) => {
                    return ConversionOutcome::Converted {
                        path: target.to_path_buf(),
                        converter: name.to_string(),
                    }
                }
                Err(e) => log::warn!("{} failed on {}: {}", name, source.display(), e),
            }
        }

        log::warn!("No converter succeeded for {}", source.display());
        ConversionOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConversionError;
    use std::sync::Mutex;

    struct Fake {
        name: &'static str,
        available: bool,
        succeeds: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Converter for Fake {
        fn name(&self) -> &str {
            self.name
        }
        fn is_available(&self) -> bool {
            self.available
        }
        fn supports(&self, format: DocumentFormat) -> bool {
            format == DocumentFormat::Epub
        }
        fn convert(&self, _source: &Path, _format: DocumentFormat, _target: &Path) -> ConversionResult<()> {
            self.calls.lock().unwrap().push(self.name);
            if self.succeeds {
                Ok(())
            } else {
                Err(ConversionError::tool_failed(self.name, "boom"))
            }
        }
    }

    fn chain(specs: &[(&'static str, bool, bool)]) -> (ConverterChain, Arc<Mutex<Vec<&'static str>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let converters = specs
            .iter()
            .map(|&(name, available, succeeds)| -> Box<dyn Converter> {
                Box::new(Fake {
                    name,
                    available,
                    succeeds,
                    calls: calls.clone(),
                })
            })
            .collect();
        (ConverterChain::new(converters), calls)
    }

    #[test]
    fn test_first_success_short_circuits() {
        let (chain, calls) = chain(&[("a", true, true), ("b", true, true)]);
        let outcome = chain.convert(Path::new("x.epub"), DocumentFormat::Epub, Path::new("x.pdf"));
        assert_eq!(
            outcome,
            ConversionOutcome::Converted {
                path: Path::new("x.pdf").to_path_buf(),
                converter: "a".to_string()
            }
        );
        assert_eq!(*calls.lock().unwrap(), vec!["a"]);
    }

    #[test]
    fn test_skips_unavailable_and_failing() {
        let (chain, calls) = chain(&[("a", false, true), ("b", true, false), ("c", true, true)]);
        let outcome = chain.convert(Path::new("x.epub"), DocumentFormat::Epub, Path::new("x.pdf"));
        assert!(outcome.succeeded());
        assert_eq!(*calls.lock().unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn test_total_failure_is_outcome_not_error() {
        let (chain, _) = chain(&[("a", true, false), ("b", false, true)]);
        let outcome = chain.convert(Path::new("x.epub"), DocumentFormat::Epub, Path::new("x.pdf"));
        assert_eq!(outcome, ConversionOutcome::Failed);
    }

    #[test]
    fn test_unsupported_format_skipped() {
        let (chain, calls) = chain(&[("a", true, true)]);
        let outcome = chain.convert(Path::new("x.djvu"), DocumentFormat::Djvu, Path::new("x.pdf"));
        assert!(!outcome.succeeded());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_from_config_order() {
        let mut config = ConversionConfig::default();
        config.converter_order = vec![ConverterKind::Builtin, ConverterKind::Pandoc];
        let chain = ConverterChain::from_config(&config, Arc::new(crate::PdfRenderer::new()));
        assert_eq!(chain.names(), vec!["builtin", "pandoc"]);
    }
}
