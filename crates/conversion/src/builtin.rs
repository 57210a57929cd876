//! Minimal in-process EPUB/TXT to PDF converter

use crate::converter::Converter;
use crate::document::Document;
use crate::error::{ConversionError, ConversionResult};
use crate::render::DocumentRenderer;
use bookfetch_core::DocumentFormat;
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::{Arc, LazyLock};

pub const NO_TEXT_PLACEHOLDER: &str = "No textual content could be extracted.";

static BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").expect("body pattern is valid"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            let decoded = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = entity.strip_prefix('#') {
                dec.parse().ok().and_then(char::from_u32)
            } else {
                match entity {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some(' '),
                    _ => None,
                }
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

/// Visible text of one XHTML document: body only, tags stripped
pub fn html_text(html: &str) -> String {
    let body = BODY_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map_or(html, |m| m.as_str());
    decode_entities(&TAG_RE.replace_all(body, ""))
}

fn line_paragraphs(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Paragraphs from every content document of an EPUB, in archive order
///
/// An unreadable archive yields no paragraphs.
pub fn epub_paragraphs(path: &Path) -> Vec<String> {
    let archive = File::open(path)
        .map_err(|e| e.to_string())
        .and_then(|f| zip::ZipArchive::new(f).map_err(|e| e.to_string()));
    let mut archive = match archive {
        Ok(a) => a,
        Err(e) => {
            log::warn!("Cannot read EPUB {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let mut paragraphs = Vec::new();
    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping entry {} of {}: {}", i, path.display(), e);
                continue;
            }
        };
        let name = entry.name().to_lowercase();
        if !(name.ends_with(".xhtml") || name.ends_with(".html") || name.ends_with(".htm")) {
            continue;
        }

        let mut raw = Vec::new();
        if let Err(e) = entry.read_to_end(&mut raw) {
            log::warn!("Skipping {} in {}: {}", name, path.display(), e);
            continue;
        }
        paragraphs.extend(line_paragraphs(&html_text(&String::from_utf8_lossy(&raw))));
    }
    paragraphs
}

fn text_paragraphs(path: &Path) -> Vec<String> {
    match std::fs::read(path) {
        Ok(bytes) => line_paragraphs(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Lays extracted text out as a flowing PDF
///
/// Always produces output unless the target cannot be written.
pub struct BuiltinConverter {
    renderer: Arc<dyn DocumentRenderer>,
}

impl BuiltinConverter {
    pub fn new(renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { renderer }
    }

    /// Builds the document for a source file; a placeholder when it has no text
    pub fn document_for(source: &Path, format: DocumentFormat) -> ConversionResult<Document> {
        let paragraphs = match format {
            DocumentFormat::Txt => text_paragraphs(source),
            DocumentFormat::Epub => epub_paragraphs(source),
            other => {
                return Err(ConversionError::Unsupported {
                    converter: "builtin".to_string(),
                    format: other.to_string(),
                })
            }
        };

        let mut doc = Document::new();
        if paragraphs.is_empty() {
            doc.push_note(NO_TEXT_PLACEHOLDER);
        } else {
            for p in paragraphs {
                doc.push_paragraph(vec![p]);
            }
        }
        Ok(doc)
    }
}

impl Converter for BuiltinConverter {
    fn name(&self) -> &str {
        "builtin"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn supports(&self, format: DocumentFormat) -> bool {
        matches!(format, DocumentFormat::Epub | DocumentFormat::Txt)
    }

    fn convert(&self, source: &Path, format: DocumentFormat, target: &Path) -> ConversionResult<()> {
        let doc = Self::document_for(source, format)?;
        self.renderer.render(&doc, target)
    }
}
