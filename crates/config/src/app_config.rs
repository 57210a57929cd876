//! Output defaults and log verbosity

use crate::check::{Checker, Section};
use bookfetch_core::SourceKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log level used when `RUST_LOG` is not set
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parses a level name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,

    /// Directory fetched and rendered files are written to
    pub output_dir: PathBuf,

    /// Catalog sources consulted when `--sites` is not given
    pub default_sites: Vec<SourceKind>,

    /// Convert non-PDF downloads without `--convert`
    pub convert_by_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            output_dir: PathBuf::from("books"),
            default_sites: SourceKind::all(),
            convert_by_default: false,
        }
    }
}

impl Section for AppConfig {
    const NAME: &'static str = "app";

    fn check(&self, checker: &mut Checker<'_>) {
        if self.output_dir.as_os_str().is_empty() {
            checker.fail("output_dir", "must not be empty", None);
        }
        checker.unique("default_sites", &self.default_sites);
    }
}
