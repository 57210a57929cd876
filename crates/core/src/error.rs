//! Errors raised by the shared data model
//!
//! Failures while resolving a request stay inside the crate that hits them
//! (`NetworkError`, `SourceError`, `ConversionError`, `TranscriptionError`)
//! and are logged and skipped there; a failed conversion or a missing
//! transcript is an outcome, not an error. What reaches this type is bad
//! caller input caught while building the request.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl AppError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = AppError::invalid_argument("unknown source 'nowhere'");
        assert_eq!(err.to_string(), "Invalid argument: unknown source 'nowhere'");
    }
}
