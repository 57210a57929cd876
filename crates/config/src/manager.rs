//! Locating, loading and initializing the config file

use crate::error::{ConfigError, ConfigResult, Problem};
use crate::{store, Config, ConverterKind, LogLevel, CONFIG_VERSION};
use bookfetch_core::SourceKind;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const FILE_NAME: &str = "config.toml";

/// Where the loaded values came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// No file existed; built-in defaults were used
    Defaults,
}

/// A config ready to use, plus everything worth telling the user about it
///
/// Loading never logs; callers report `problems` and `notes` once their
/// logger is running.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
    /// Settings that fail validation after env overrides are applied
    pub problems: Vec<Problem>,
    /// Ignored overrides and version mismatches
    pub notes: Vec<String>,
}

impl LoadedConfig {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Resolves the config file path and applies `BOOKFETCH_*` overrides
#[derive(Debug, Clone)]
pub struct ConfigManager {
    dir: PathBuf,
}

impl ConfigManager {
    /// Uses the platform config directory, e.g. `~/.config/bookfetch/` on Linux
    pub fn new() -> ConfigResult<Self> {
        ProjectDirs::from("", "", "bookfetch")
            .map(|dirs| Self::with_directory(dirs.config_dir()))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn with_directory(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn config_dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// Reads the file (or defaults), then the process environment
    pub fn load(&self) -> ConfigResult<LoadedConfig> {
        self.load_with(|key| std::env::var(key).ok())
    }

    fn load_with<F>(&self, lookup: F) -> ConfigResult<LoadedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = self.config_path();
        let (mut config, origin) = match store::read(&path)? {
            Some(config) => (config, ConfigOrigin::File(path)),
            None => (Config::default(), ConfigOrigin::Defaults),
        };

        let mut notes = Vec::new();
        if config.version > CONFIG_VERSION {
            notes.push(format!(
                "config file version {} is newer than this build understands ({}); unknown keys are ignored",
                config.version, CONFIG_VERSION
            ));
        }
        apply_env_overrides(&mut config, lookup, &mut notes);

        Ok(LoadedConfig {
            problems: config.problems(),
            config,
            origin,
            notes,
        })
    }

    /// Writes the commented default file unless one already exists
    ///
    /// Returns whether a file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        let path = self.config_path();
        if path.exists() {
            return Ok(false);
        }
        store::write_template(&path)?;
        Ok(true)
    }
}

/// Applies `BOOKFETCH_SECTION_FIELD` overrides looked up through `lookup`
///
/// Values that do not parse leave the setting untouched and add a note.
fn apply_env_overrides<F>(config: &mut Config, lookup: F, notes: &mut Vec<String>)
where
    F: Fn(&str) -> Option<String>,
{
    let mut ignored = |key: &str, value: &str, reason: String| {
        notes.push(format!("ignoring {}={:?}: {}", key, value, reason));
    };

    if let Some(dir) = lookup("BOOKFETCH_APP_OUTPUT_DIR") {
        config.app.output_dir = PathBuf::from(dir);
    }

    const LEVEL: &str = "BOOKFETCH_APP_LOG_LEVEL";
    if let Some(level) = lookup(LEVEL) {
        match LogLevel::parse(&level) {
            Some(parsed) => config.app.log_level = parsed,
            None => ignored(LEVEL, &level, "unknown log level".to_string()),
        }
    }

    const SITES: &str = "BOOKFETCH_APP_DEFAULT_SITES";
    if let Some(sites) = lookup(SITES) {
        match SourceKind::parse_list(&sites) {
            Ok(kinds) if !kinds.is_empty() => config.app.default_sites = kinds,
            Ok(_) => ignored(SITES, &sites, "no site named".to_string()),
            Err(e) => ignored(SITES, &sites, e.to_string()),
        }
    }

    const TIMEOUT: &str = "BOOKFETCH_NETWORK_TIMEOUT_SECS";
    if let Some(timeout) = lookup(TIMEOUT) {
        match timeout.trim().parse::<u64>() {
            Ok(secs) => config.network.timeout_secs = secs,
            Err(e) => ignored(TIMEOUT, &timeout, e.to_string()),
        }
    }

    if let Some(agent) = lookup("BOOKFETCH_NETWORK_USER_AGENT") {
        config.network.user_agent = agent;
    }

    const ORDER: &str = "BOOKFETCH_CONVERSION_ORDER";
    if let Some(order) = lookup(ORDER) {
        let parsed: Result<Vec<ConverterKind>, String> = order
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect();
        match parsed {
            Ok(kinds) => config.conversion.converter_order = kinds,
            Err(reason) => ignored(ORDER, &order, reason),
        }
    }

    if let Some(command) = lookup("BOOKFETCH_CONVERSION_WHISPER_COMMAND") {
        config.conversion.whisper_command = command;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_new_manager() {
        let manager = ConfigManager::new().unwrap();
        assert!(manager.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = ConfigManager::with_directory(dir.path())
            .load_with(env(&[]))
            .unwrap();

        assert_eq!(loaded.origin, ConfigOrigin::Defaults);
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.is_valid());
        assert!(loaded.notes.is_empty());
    }

    #[test]
    fn test_env_overrides_applied() {
        let mut config = Config::default();
        let mut notes = Vec::new();
        apply_env_overrides(
            &mut config,
            env(&[
                ("BOOKFETCH_APP_OUTPUT_DIR", "/tmp/shelf"),
                ("BOOKFETCH_NETWORK_TIMEOUT_SECS", "45"),
                ("BOOKFETCH_APP_LOG_LEVEL", "debug"),
                ("BOOKFETCH_APP_DEFAULT_SITES", "gutendex"),
                ("BOOKFETCH_CONVERSION_ORDER", "builtin, pandoc"),
                ("BOOKFETCH_CONVERSION_WHISPER_COMMAND", "/opt/whisper/bin/whisper"),
            ]),
            &mut notes,
        );

        assert!(notes.is_empty());
        assert_eq!(config.app.output_dir, PathBuf::from("/tmp/shelf"));
        assert_eq!(config.network.timeout_secs, 45);
        assert_eq!(config.app.log_level, LogLevel::Debug);
        assert_eq!(config.app.default_sites, vec![SourceKind::Gutenberg]);
        assert_eq!(
            config.conversion.converter_order,
            vec![ConverterKind::Builtin, ConverterKind::Pandoc]
        );
        assert_eq!(config.conversion.whisper_command, "/opt/whisper/bin/whisper");
        assert_eq!(config.network.user_agent, "book-downloader/2.0");
    }

    #[test]
    fn test_bad_env_overrides_become_notes() {
        let mut config = Config::default();
        let mut notes = Vec::new();
        apply_env_overrides(
            &mut config,
            env(&[
                ("BOOKFETCH_NETWORK_TIMEOUT_SECS", "soon"),
                ("BOOKFETCH_APP_LOG_LEVEL", "shouting"),
                ("BOOKFETCH_APP_DEFAULT_SITES", "library-of-babel"),
                ("BOOKFETCH_CONVERSION_ORDER", "pandoc,tesseract"),
            ]),
            &mut notes,
        );

        assert_eq!(config, Config::default());
        assert_eq!(notes.len(), 4);
        assert!(notes[0].starts_with("ignoring BOOKFETCH_APP_LOG_LEVEL"));
        assert!(notes.iter().any(|n| n.contains("tesseract")));
    }

    #[test]
    fn test_override_can_produce_a_problem() {
        let dir = TempDir::new().unwrap();
        let loaded = ConfigManager::with_directory(dir.path())
            .load_with(env(&[("BOOKFETCH_NETWORK_TIMEOUT_SECS", "0")]))
            .unwrap();

        assert!(!loaded.is_valid());
        assert_eq!(loaded.problems.len(), 1);
        assert_eq!(loaded.problems[0].field, "network.timeout_secs");
    }

    #[test]
    fn test_newer_file_version_is_noted() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path());
        std::fs::write(manager.config_path(), "version = 7\n").unwrap();

        let loaded = manager.load_with(env(&[])).unwrap();
        assert_eq!(loaded.origin, ConfigOrigin::File(manager.config_path()));
        assert_eq!(loaded.notes.len(), 1);
        assert!(loaded.notes[0].contains("version 7"));
    }

    #[test]
    fn test_initialize_only_once() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_directory(dir.path());

        assert!(manager.initialize().unwrap());
        assert!(manager.config_path().exists());
        assert!(!manager.initialize().unwrap());
    }
}
