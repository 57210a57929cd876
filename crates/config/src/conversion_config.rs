//! Converter chain and transcription commands

use crate::check::{Checker, Section};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Converters that can appear in the chain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ConverterKind {
    /// Calibre's `ebook-convert`
    EbookConvert,
    Pandoc,
    /// In-process EPUB/TXT to PDF renderer
    Builtin,
}

impl ConverterKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConverterKind::EbookConvert => "ebook-convert",
            ConverterKind::Pandoc => "pandoc",
            ConverterKind::Builtin => "builtin",
        }
    }
}

impl std::fmt::Display for ConverterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConverterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ebook-convert" | "calibre" => Ok(Self::EbookConvert),
            "pandoc" => Ok(Self::Pandoc),
            "builtin" => Ok(Self::Builtin),
            other => Err(format!("unknown converter '{}'", other)),
        }
    }
}

/// External tool commands and the order converters are tried in
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConversionConfig {
    /// Converters in priority order
    pub converter_order: Vec<ConverterKind>,

    /// Command name or path for Calibre's converter
    pub ebook_convert_command: String,

    pub pandoc_command: String,

    /// Command name or path for the whisper CLI
    pub whisper_command: String,

    pub whisper_model: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            converter_order: vec![
                ConverterKind::EbookConvert,
                ConverterKind::Pandoc,
                ConverterKind::Builtin,
            ],
            ebook_convert_command: "ebook-convert".to_string(),
            pandoc_command: "pandoc".to_string(),
            whisper_command: "whisper".to_string(),
            whisper_model: "small".to_string(),
        }
    }
}

impl Section for ConversionConfig {
    const NAME: &'static str = "conversion";

    fn check(&self, checker: &mut Checker<'_>) {
        if self.converter_order.is_empty() {
            checker.fail("converter_order", "must list at least one converter", None);
        }
        checker.unique("converter_order", &self.converter_order);
        checker.filled("ebook_convert_command", &self.ebook_convert_command);
        checker.filled("pandoc_command", &self.pandoc_command);
        checker.filled("whisper_command", &self.whisper_command);
        checker.filled("whisper_model", &self.whisper_model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let config = ConversionConfig::default();
        assert!(config.problems().is_empty());
        assert_eq!(
            config.converter_order,
            vec![
                ConverterKind::EbookConvert,
                ConverterKind::Pandoc,
                ConverterKind::Builtin
            ]
        );
    }

    #[test]
    fn test_duplicate_converter_rejected() {
        let mut config = ConversionConfig::default();
        config.converter_order.push(ConverterKind::Pandoc);
        let problems = config.problems();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].to_string().contains("listed twice"));
    }

    #[test]
    fn test_empty_order_rejected() {
        let mut config = ConversionConfig::default();
        config.converter_order.clear();
        assert_eq!(config.problems()[0].field, "conversion.converter_order");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("Calibre".parse::<ConverterKind>(), Ok(ConverterKind::EbookConvert));
        assert_eq!(" builtin ".parse::<ConverterKind>(), Ok(ConverterKind::Builtin));
        assert!("tesseract".parse::<ConverterKind>().is_err());

        let toml = toml::to_string(&ConversionConfig::default()).unwrap();
        assert!(toml.contains("\"ebook-convert\""));
    }
}
