//! Document format tags and detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Document formats that can be selected from a catalog or produced locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Paginated document, the target of every conversion
    Pdf,
    /// Reflowable EPUB container
    Epub,
    /// DjVu scan
    Djvu,
    /// Plain text
    Txt,
    /// Kindle/Mobipocket
    Kindle,
}

impl DocumentFormat {
    /// Returns all known formats
    pub fn all() -> Vec<Self> {
        vec![Self::Pdf, Self::Epub, Self::Djvu, Self::Txt, Self::Kindle]
    }

    /// Lower-case tag matched as a substring of declared catalog format tags
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Epub => "epub",
            Self::Djvu => "djvu",
            Self::Txt => "txt",
            Self::Kindle => "kindle",
        }
    }

    /// Returns the canonical file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Kindle => "mobi",
            other => other.tag(),
        }
    }

    /// Returns true if a free-text catalog format tag names this format
    ///
    /// Matching is a case-insensitive substring test, so "EPUB (old)" and
    /// "Text PDF" both match their respective formats.
    pub fn matches_tag(&self, declared: &str) -> bool {
        declared.to_lowercase().contains(self.tag())
    }

    /// Parses an exact tag such as "pdf" or "epub"
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        Self::all().into_iter().find(|f| f.tag() == tag)
    }

    /// Detects format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "epub" => Some(Self::Epub),
            "djvu" | "djv" => Some(Self::Djvu),
            "txt" | "text" => Some(Self::Txt),
            "mobi" | "azw" | "azw3" | "kindle" => Some(Self::Kindle),
            _ => None,
        }
    }

    /// Detects format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_tag_is_case_insensitive_substring() {
        assert!(DocumentFormat::Pdf.matches_tag("Text PDF"));
        assert!(DocumentFormat::Epub.matches_tag("EPUB (old)"));
        assert!(DocumentFormat::Epub.matches_tag("application/epub+zip"));
        assert!(!DocumentFormat::Pdf.matches_tag("DjVu"));
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("books/Middlemarch.EPUB")),
            Some(DocumentFormat::Epub)
        );
        assert_eq!(DocumentFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_kindle_extension() {
        assert_eq!(DocumentFormat::Kindle.extension(), "mobi");
        assert_eq!(DocumentFormat::from_extension("azw3"), Some(DocumentFormat::Kindle));
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(DocumentFormat::from_tag(" PDF "), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_tag("mp3"), None);
    }
}
