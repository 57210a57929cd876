// FILE: crates/pipeline/src/error.rs

use bookfetch_network::NetworkError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[from] NetworkError),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
