//! Pagination of a [`Document`] onto US Letter pages

use crate::document::{Block, Document};

pub const PAGE_WIDTH_MM: f32 = 215.9;
pub const PAGE_HEIGHT_MM: f32 = 279.4;
pub const MARGIN_MM: f32 = 25.4;

const PT_TO_MM: f32 = 25.4 / 72.0;
const LINE_SPACING: f32 = 1.35;
// Average Helvetica glyph width as a fraction of the font size
const AVG_CHAR_EM: f32 = 0.5;

/// Built-in font faces used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size_pt: f32,
    face: FontFace,
    space_after_pt: f32,
}

const TITLE: TextStyle = TextStyle {
    size_pt: 18.0,
    face: FontFace::Bold,
    space_after_pt: 12.0,
};
const BYLINE: TextStyle = TextStyle {
    size_pt: 12.0,
    face: FontFace::Italic,
    space_after_pt: 12.0,
};
const BODY: TextStyle = TextStyle {
    size_pt: 11.0,
    face: FontFace::Regular,
    space_after_pt: 6.0,
};

/// A line of text at a fixed position; `y_mm` is measured from the page bottom
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub face: FontFace,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Splits text into lines of at most `max_chars`, breaking on whitespace
///
/// Words longer than a full line are cut.
pub fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn chars_per_line(size_pt: f32) -> usize {
    let usable_pt = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM) / PT_TO_MM;
    (usable_pt / (size_pt * AVG_CHAR_EM)).floor() as usize
}

struct Cursor {
    pages: Vec<Page>,
    y_mm: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn line(&mut self, text: String, style: TextStyle) {
        let height = style.size_pt * LINE_SPACING * PT_TO_MM;
        if self.y_mm - height < MARGIN_MM {
            self.new_page();
        }
        self.y_mm -= height;
        let y_mm = self.y_mm;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(PlacedLine {
                text,
                x_mm: MARGIN_MM,
                y_mm,
                size_pt: style.size_pt,
                face: style.face,
            });
        }
    }

    fn text(&mut self, text: &str, style: TextStyle) {
        for line in wrap(text, chars_per_line(style.size_pt)) {
            self.line(line, style);
        }
    }

    fn space(&mut self, pt: f32) {
        self.y_mm -= pt * PT_TO_MM;
    }
}

/// Lays out a document; always yields at least one page
pub fn layout(doc: &Document) -> Vec<Page> {
    let mut cursor = Cursor::new();

    if let Some(title) = &doc.title {
        cursor.text(title, TITLE);
        cursor.space(TITLE.space_after_pt);
    }
    if let Some(byline) = &doc.byline {
        cursor.text(byline, BYLINE);
        cursor.space(BYLINE.space_after_pt);
    }

    for block in &doc.blocks {
        match block {
            Block::Paragraph(lines) => {
                for line in lines {
                    cursor.text(line, BODY);
                }
            }
            Block::Note(text) => cursor.text(text, BODY),
        }
        cursor.space(BODY.space_after_pt);
    }

    cursor.pages
}
