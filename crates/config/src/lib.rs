//! bookfetch configuration
//!
//! Everything a run needs to know that is not part of the request itself:
//! catalog endpoints, the identification header and timeouts used for every
//! HTTP call, output defaults, and the converter/transcriber commands. The
//! loaded [`Config`] is passed explicitly to whatever needs it; nothing in the
//! workspace reads ambient globals.
//!
//! # Example
//!
//! ```rust,no_run
//! use bookfetch_config::ConfigManager;
//!
//! let loaded = ConfigManager::new()?.load()?;
//! for problem in &loaded.problems {
//!     eprintln!("config: {}", problem);
//! }
//! println!("Timeout: {}s", loaded.config.network.timeout_secs);
//! # Ok::<(), bookfetch_config::ConfigError>(())
//! ```

mod check;
mod error;
mod manager;
mod store;

mod app_config;
mod conversion_config;
mod network_config;
mod sources_config;

pub use check::{Checker, Section};
pub use error::{ConfigError, ConfigResult, Problem};
pub use manager::{ConfigManager, ConfigOrigin, LoadedConfig};

pub use app_config::{AppConfig, LogLevel};
pub use conversion_config::{ConversionConfig, ConverterKind};
pub use network_config::NetworkConfig;
pub use sources_config::SourcesConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// HTTP identification and timeouts
    pub network: NetworkConfig,

    /// Catalog endpoints
    pub sources: SourcesConfig,

    /// Converter chain and transcription
    pub conversion: ConversionConfig,
}

impl Config {
    /// Every invalid setting across all sections, in file order
    pub fn problems(&self) -> Vec<Problem> {
        let mut problems = self.app.problems();
        problems.extend(self.network.problems());
        problems.extend(self.sources.problems());
        problems.extend(self.conversion.problems());
        problems
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            network: NetworkConfig::default(),
            sources: SourcesConfig::default(),
            conversion: ConversionConfig::default(),
        }
    }
}
