//! Global configuration file management.
//!
//! `~/.pwstore/configuration` is an INI file:
//!
//! ```text
//! [global]
//! directory = ~/.pwstore/storage
//! ```
//!
//! A missing file is created with the defaults.

use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use tracing::{debug, info, warn};

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory scanned for backends (`~` not yet expanded).
    pub directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: constants::DEFAULT_DIRECTORY.to_string(),
        }
    }
}

impl Config {
    /// Load the configuration at `path`, creating it with defaults when
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            warn!(path = %path.display(), "configuration file does not exist");
            let config = Self::default();
            if let Err(e) = config.save(path) {
                warn!(path = %path.display(), error = %e, "could not create configuration file");
            } else {
                info!(path = %path.display(), "created configuration with default values");
            }
            return Ok(config);
        }

        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text).map_err(|reason| {
            ConfigError::Read {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        let mut ini = Ini::new();
        ini.set_inline_comment_symbols(Some(&[]));
        ini.read(text.to_string())?;

        let mut config = Self::default();
        if let Some(directory) = ini.get("global", "directory") {
            config.directory = directory;
        }
        Ok(config)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut ini = Ini::new();
        ini.set("global", "directory", Some(self.directory.clone()));
        ini.write(path)?;
        Ok(())
    }

    /// Storage directory with `~` expanded.
    pub fn storage_dir(&self) -> Result<PathBuf> {
        expand_home(&self.directory)
    }
}

/// Expand a leading `~` to the home directory.
///
/// # Errors
///
/// Returns `ConfigError::NoHome` when the path needs a home directory that
/// cannot be determined.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => return Ok(PathBuf::from(path)),
    };
    let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
    Ok(if rest.is_empty() { home } else { home.join(rest) })
}
