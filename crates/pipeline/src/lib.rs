//! bookfetch pipeline
//!
//! Orchestration layer that composes the catalog sources, the format
//! selector, the converter chain and the audiobook normalizer.

pub mod artifact;
pub mod builder;
pub mod error;
pub mod orchestrator;

pub use artifact::{ArtifactOrigin, ProducedArtifact};
pub use builder::PipelineBuilder;
pub use error::{PipelineError, PipelineResult};
pub use orchestrator::Pipeline;
