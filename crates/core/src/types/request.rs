//! The logical ask handed to the pipeline

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Catalog-search sources that can be selected by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Internet Archive advanced search + per-item metadata
    Archive,
    /// Project Gutenberg through the Gutendex API
    Gutenberg,
}

impl SourceKind {
    /// Returns every catalog-search source in registry order
    pub fn all() -> Vec<Self> {
        vec![Self::Archive, Self::Gutenberg]
    }

    /// Short name used on the command line and in config
    pub fn name(&self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Gutenberg => "gutenberg",
        }
    }

    /// Parses a comma-separated list such as "archive, gutenberg"
    ///
    /// Unknown names are rejected; duplicates are collapsed.
    pub fn parse_list(list: &str) -> Result<Vec<Self>, AppError> {
        let mut kinds = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind = name.parse::<Self>()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

impl FromStr for SourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "archive" | "ia" | "internetarchive" => Ok(Self::Archive),
            "gutenberg" | "gutendex" => Ok(Self::Gutenberg),
            other => Err(AppError::invalid_argument(format!("unknown source '{}'", other))),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Audiobook part of a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudiobookSpec {
    /// Local audio file, used only when transcription is requested
    pub audio_path: Option<PathBuf>,
    /// Existing transcript text file
    pub transcript_path: Option<PathBuf>,
    pub title: Option<String>,
    pub author: Option<String>,
    /// Run local transcription when no transcript is given
    pub transcribe: bool,
}

impl AudiobookSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transcript(mut self, path: impl Into<PathBuf>) -> Self {
        self.transcript_path = Some(path.into());
        self
    }

    pub fn with_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_path = Some(path.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_transcription(mut self, enabled: bool) -> Self {
        self.transcribe = enabled;
        self
    }
}

/// One pipeline run's worth of intent; immutable while the run lasts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Catalog-search sources to consult
    pub sources: Vec<SourceKind>,
    /// Direct-reference page URL
    pub reference: Option<String>,
    pub audiobook: Option<AudiobookSpec>,
    /// Convert non-target artifacts when possible
    pub convert: bool,
    pub output_dir: PathBuf,
}

impl Request {
    /// Creates an empty request writing into `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            title: None,
            author: None,
            sources: SourceKind::all(),
            reference: None,
            audiobook: None,
            convert: false,
            output_dir: output_dir.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_sources(mut self, sources: Vec<SourceKind>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_reference(mut self, url: impl Into<String>) -> Self {
        self.reference = Some(url.into());
        self
    }

    pub fn with_audiobook(mut self, spec: AudiobookSpec) -> Self {
        self.audiobook = Some(spec);
        self
    }

    pub fn with_convert(mut self, convert: bool) -> Self {
        self.convert = convert;
        self
    }

    /// Returns true if the given catalog source was selected
    pub fn wants(&self, kind: SourceKind) -> bool {
        self.sources.contains(&kind)
    }

    /// Title with surrounding whitespace removed, if non-empty
    pub fn search_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_list() {
        let kinds = SourceKind::parse_list("archive, Gutenberg,archive").unwrap();
        assert_eq!(kinds, vec![SourceKind::Archive, SourceKind::Gutenberg]);
    }

    #[test]
    fn test_parse_unknown_source() {
        let err = SourceKind::parse_list("archive,library-of-babel").unwrap_err();
        assert_eq!(
            err,
            AppError::invalid_argument("unknown source 'library-of-babel'")
        );
    }

    #[test]
    fn test_request_builder() {
        let request = Request::new("books")
            .with_title("Middlemarch")
            .with_sources(vec![SourceKind::Archive])
            .with_convert(true);

        assert!(request.wants(SourceKind::Archive));
        assert!(!request.wants(SourceKind::Gutenberg));
        assert_eq!(request.search_title(), Some("Middlemarch"));
        assert!(request.convert);
    }

    #[test]
    fn test_blank_title_is_not_searchable() {
        let request = Request::new("books").with_title("   ");
        assert_eq!(request.search_title(), None);
    }

    #[test]
    fn test_audiobook_spec_builder() {
        let spec = AudiobookSpec::new()
            .with_title("T")
            .with_transcript("t.txt")
            .with_transcription(true);
        assert_eq!(spec.title.as_deref(), Some("T"));
        assert!(spec.transcribe);
        assert!(spec.audio_path.is_none());
    }
}
