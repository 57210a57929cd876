//! Config errors and per-field problems

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failures that leave no usable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory could be determined for this user")]
    NoConfigDir,

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A present but blank file is treated as damaged, not as "use defaults"
    #[error("{} is empty; delete it or run `bookfetch config init`", path.display())]
    Empty { path: PathBuf },

    #[error("{} is not valid TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot render the default config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// One invalid setting, addressed as `section.field`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub field: String,
    pub message: String,
    pub value: Option<String>,
}

impl Problem {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl fmt::Display) -> Self {
        self.value = Some(value.to_string());
        self
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)?;
        match &self.value {
            Some(value) => write!(f, " (found {:?})", value),
            None => Ok(()),
        }
    }
}
