//! Results of fetching and converting

use crate::types::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A file fetched to local storage; kept as user output after the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArtifact {
    pub path: PathBuf,
    pub format: DocumentFormat,
}

impl FetchedArtifact {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Path for a converted sibling: same directory and stem, new extension
    pub fn converted_path(&self, target: DocumentFormat) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "converted".to_string());
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        dir.join(format!("{}.{}", stem, target.extension()))
    }
}

/// Outcome of running a converter chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// A converter wrote the target
    Converted {
        path: PathBuf,
        /// Name of the converter that succeeded
        converter: String,
    },
    /// Every converter was unavailable or failed
    Failed,
}

impl ConversionOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// Produced path, on success
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Converted { path, .. } => Some(path),
            Self::Failed => None,
        }
    }
}
