// FILE: crates/audiobook/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscriptionError {
    #[error("Transcription engine not found: {0}")]
    EngineMissing(String),

    #[error("Transcription failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type TranscriptionResult<T> = Result<T, TranscriptionError>;
