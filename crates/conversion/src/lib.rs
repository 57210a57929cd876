//! Document conversion: converter chain, capability probing and PDF rendering

mod builtin;
mod capabilities;
mod converter;
mod document;
mod error;
mod external;
mod layout;
mod render;

pub use builtin::{epub_paragraphs, html_text, BuiltinConverter, NO_TEXT_PLACEHOLDER};
pub use capabilities::{find_executable, Capability, HostCapabilities};
pub use converter::{Converter, ConverterChain};
pub use document::{Block, Document};
pub use error::{ConversionError, ConversionResult};
pub use external::ExternalConverter;
pub use layout::{layout, wrap, FontFace, Page, PlacedLine};
pub use render::{DocumentRenderer, PdfRenderer};

pub mod prelude {
    pub use crate::{
        ConversionError, ConversionResult, Converter, ConverterChain, Document, DocumentRenderer,
        PdfRenderer,
    };
}
