//! Domain types for bookfetch
//!
//! - `request`: the logical ask and the audiobook spec
//! - `catalog`: catalog items and file descriptors
//! - `artifact`: fetched artifacts and conversion outcomes
//! - `format`: document format tags
//! - `naming`: output file naming

mod artifact;
mod catalog;
mod format;
mod naming;
mod request;

pub use artifact::{ConversionOutcome, FetchedArtifact};
pub use catalog::{CatalogItem, FileDescriptor};
pub use format::DocumentFormat;
pub use naming::{last_segment, safe_filename};
pub use request::{AudiobookSpec, Request, SourceKind};
