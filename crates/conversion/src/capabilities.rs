// FILE: src/capabilities.rs
// ============================================================================

//! Host capability probing for optional external tools

use bookfetch_config::ConversionConfig;
use std::path::{Path, PathBuf};

/// Finds an executable by name on `PATH`, or checks an explicit path
pub fn find_executable(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        executable_names(command)
            .into_iter()
            .map(|name| dir.join(name))
            .find(|p| is_executable(p))
    })
}

#[cfg(windows)]
fn executable_names(command: &str) -> Vec<String> {
    vec![
        command.to_string(),
        format!("{}.exe", command),
        format!("{}.cmd", command),
        format!("{}.bat", command),
    ]
}

#[cfg(not(windows))]
fn executable_names(command: &str) -> Vec<String> {
    vec![command.to_string()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// One optional tool and where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub name: &'static str,
    pub command: String,
    pub location: Option<PathBuf>,
}

impl Capability {
    pub fn detect(name: &'static str, command: &str) -> Self {
        Self {
            name,
            command: command.to_string(),
            location: find_executable(command),
        }
    }

    pub fn is_available(&self) -> bool {
        self.location.is_some()
    }
}

/// Snapshot of every optional tool the pipeline can use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCapabilities {
    pub tools: Vec<Capability>,
}

impl HostCapabilities {
    pub fn detect(config: &ConversionConfig) -> Self {
        Self {
            tools: vec![
                Capability::detect("ebook-convert", &config.ebook_convert_command),
                Capability::detect("pandoc", &config.pandoc_command),
                Capability::detect("whisper", &config.whisper_command),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&Capability> {
        self.tools.iter().find(|c| c.name == name)
    }

    /// Logs availability of every tool at info level
    pub fn log_summary(&self) {
        for tool in &self.tools {
            match &tool.location {
                Some(path) => log::info!("{} available at {}", tool.name, path.display()),
                None => log::info!("{} not found ({})", tool.name, tool.command),
            }
        }
    }
}
