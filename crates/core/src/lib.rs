//! Core data model shared by every bookfetch crate

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::AppError;
pub use types::{
    last_segment, safe_filename, AudiobookSpec, CatalogItem, ConversionOutcome, DocumentFormat,
    FetchedArtifact, FileDescriptor, Request, SourceKind,
};
