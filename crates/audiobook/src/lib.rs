// FILE: crates/audiobook/src/lib.rs
//! Audiobook to document normalization

mod error;
mod normalizer;
mod transcriber;

pub use error::{TranscriptionError, TranscriptionResult};
pub use normalizer::{
    AudiobookNormalizer, FailureReason, NormalizeOutcome, NormalizeState, NO_TRANSCRIPT_NOTE,
};
pub use transcriber::{Transcriber, WhisperCommand};
