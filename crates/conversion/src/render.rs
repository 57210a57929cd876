//! PDF output for laid-out documents

use crate::document::Document;
use crate::error::{ConversionError, ConversionResult};
use crate::layout::{layout, FontFace, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes a [`Document`] to a file in the target format
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, doc: &Document, target: &Path) -> ConversionResult<()>;
}

/// Renders with printpdf using the built-in Helvetica faces
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, doc: &Document, target: &Path) -> ConversionResult<()> {
        let err = |e: printpdf::Error| ConversionError::render(target, e.to_string());

        let title = doc.title.as_deref().unwrap_or("bookfetch");
        let (pdf, first_page, first_layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = pdf.add_builtin_font(BuiltinFont::Helvetica).map_err(err)?;
        let bold = pdf.add_builtin_font(BuiltinFont::HelveticaBold).map_err(err)?;
        let italic = pdf
            .add_builtin_font(BuiltinFont::HelveticaOblique)
            .map_err(err)?;

        for (i, page) in layout(doc).iter().enumerate() {
            let (page_index, layer_index) = if i == 0 {
                (first_page, first_layer)
            } else {
                pdf.add_page(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    format!("Layer {}", i + 1),
                )
            };
            let layer = pdf.get_page(page_index).get_layer(layer_index);

            for line in &page.lines {
                let font = match line.face {
                    FontFace::Regular => &regular,
                    FontFace::Bold => &bold,
                    FontFace::Italic => &italic,
                };
                layer.use_text(
                    line.text.as_str(),
                    line.size_pt,
                    Mm(line.x_mm),
                    Mm(line.y_mm),
                    font,
                );
            }
        }

        let file = File::create(target)?;
        pdf.save(&mut BufWriter::new(file)).map_err(err)?;
        log::debug!("Rendered {}", target.display());
        Ok(())
    }
}
