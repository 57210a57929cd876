//! Flowing document model shared by the converters and the audiobook renderer

use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("blank line pattern is valid"));

/// A block of body content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Lines separated by hard line breaks
    Paragraph(Vec<String>),
    /// Free-form explanatory text
    Note(String),
}

/// Title, byline and body blocks, laid out top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub title: Option<String>,
    pub byline: Option<String>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_byline(mut self, byline: impl Into<String>) -> Self {
        self.byline = Some(byline.into());
        self
    }

    pub fn push_paragraph(&mut self, lines: Vec<String>) {
        if !lines.is_empty() {
            self.blocks.push(Block::Paragraph(lines));
        }
    }

    pub fn push_note(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Note(text.into()));
    }

    /// Appends a text corpus, one paragraph per blank-line-separated chunk
    ///
    /// Single newlines inside a chunk become line breaks.
    pub fn push_corpus(&mut self, corpus: &str) {
        let normalized = corpus.replace("\r\n", "\n");
        for chunk in BLANK_LINE_RE.split(&normalized) {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            self.push_paragraph(chunk.lines().map(|l| l.trim_end().to_string()).collect());
        }
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &[String]> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(lines) => Some(lines.as_slice()),
            Block::Note(_) => None,
        })
    }

    pub fn has_body(&self) -> bool {
        !self.blocks.is_empty()
    }

    /// All visible text in reading order
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.title.iter().cloned());
        parts.extend(self.byline.iter().cloned());
        for block in &self.blocks {
            match block {
                Block::Paragraph(lines) => parts.push(lines.join("\n")),
                Block::Note(text) => parts.push(text.clone()),
            }
        }
        parts.join("\n\n")
    }
}
