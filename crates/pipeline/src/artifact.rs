//! What a pipeline run hands back to its caller

use bookfetch_core::{DocumentFormat, FetchedArtifact, SourceKind};
use std::fmt;
use std::path::PathBuf;

/// Where a produced file came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOrigin {
    Direct,
    Catalog(SourceKind),
    Audiobook,
}

impl fmt::Display for ArtifactOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "standard ebooks"),
            Self::Catalog(kind) => write!(f, "{}", kind),
            Self::Audiobook => write!(f, "audiobook"),
        }
    }
}

/// A file the run left in the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedArtifact {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub origin: ArtifactOrigin,
}

impl ProducedArtifact {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat, origin: ArtifactOrigin) -> Self {
        Self {
            path: path.into(),
            format,
            origin,
        }
    }

    pub fn from_fetched(artifact: FetchedArtifact, origin: ArtifactOrigin) -> Self {
        Self::new(artifact.path, artifact.format, origin)
    }
}
