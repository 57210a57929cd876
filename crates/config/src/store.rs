//! Reading the config file and writing the starter template

use crate::error::{ConfigError, ConfigResult};
use crate::Config;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

const TEMPLATE_HEADER: &str = "\
# bookfetch configuration
#
# [app]        output directory, default sites, log level
# [network]    User-Agent, timeout and redirect policy for every request
# [sources]    catalog endpoints (Internet Archive, Gutendex)
# [conversion] converter order and external tool commands
#
# Environment overrides take precedence over this file:
#   BOOKFETCH_APP_OUTPUT_DIR, BOOKFETCH_APP_LOG_LEVEL, BOOKFETCH_APP_DEFAULT_SITES,
#   BOOKFETCH_NETWORK_TIMEOUT_SECS, BOOKFETCH_NETWORK_USER_AGENT,
#   BOOKFETCH_CONVERSION_ORDER, BOOKFETCH_CONVERSION_WHISPER_COMMAND

";

/// Reads and parses `path`; `Ok(None)` when no file exists
pub(crate) fn read(path: &Path) -> ConfigResult<Option<Config>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if text.trim().is_empty() {
        return Err(ConfigError::Empty {
            path: path.to_path_buf(),
        });
    }

    toml::from_str(&text)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Writes the commented default config to `path`
///
/// The file appears complete or not at all.
pub(crate) fn write_template(path: &Path) -> ConfigResult<()> {
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(write_err)?;

    let body = toml::to_string_pretty(&Config::default())?;
    let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
    staged.write_all(TEMPLATE_HEADER.as_bytes()).map_err(write_err)?;
    staged.write_all(body.as_bytes()).map_err(write_err)?;
    staged.as_file().sync_all().map_err(write_err)?;
    staged.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
