//! Error types for conversion and rendering

use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Errors raised by a single converter or the renderer
#[derive(Debug, Error)]
pub enum ConversionError {
    /// External tool is not installed
    #[error("{tool} is not available")]
    ToolMissing { tool: String },

    /// External tool ran and reported failure
    #[error("{tool} failed: {reason}")]
    ToolFailed { tool: String, reason: String },

    /// Converter does not read this format
    #[error("{converter} cannot convert {format}")]
    Unsupported { converter: String, format: String },

    /// Converter claimed success but left no output
    #[error("No output written to {}", path.display())]
    MissingOutput { path: PathBuf },

    /// PDF engine error
    #[error("Render failed for {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    pub fn tool_failed(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    pub fn render(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
