//! Backend marker file (`storage.conf`) parsing.
//!
//! The marker is an INI document. Section and option names are
//! case-insensitive and values may continue over indented lines:
//!
//! ```text
//! [backend]
//! type = gpg
//!
//! [gpg]
//! keys =
//!     Alice <alice@example.com>
//!     Bob <bob@example.com>
//! gpg-binary = /usr/local/bin/gpg2
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;
use tracing::trace;

use crate::error::{DiscoveryError, Result};

type Sections = HashMap<String, HashMap<String, Option<String>>>;

/// Parsed key-value settings of one backend.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    path: PathBuf,
    sections: Sections,
}

impl Settings {
    /// Read and parse the marker file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Parse` if the file cannot be read or is not
    /// valid INI.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| DiscoveryError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse_at(path, &text)
    }

    /// Parse settings from text. Errors name `<memory>` as the source.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_at(Path::new("<memory>"), text)
    }

    fn parse_at(path: &Path, text: &str) -> Result<Self> {
        let mut ini = Ini::new();
        ini.set_multiline(true);
        // `#` and `;` only start a comment at the beginning of a line.
        ini.set_inline_comment_symbols(Some(&[]));
        let sections = ini
            .read(text.to_string())
            .map_err(|reason| DiscoveryError::Parse {
                path: path.to_path_buf(),
                reason,
            })?;
        trace!(path = %path.display(), sections = sections.len(), "parsed settings");

        Ok(Self {
            path: path.to_path_buf(),
            sections,
        })
    }

    /// File these settings were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(&section.to_lowercase())
    }

    /// Value of `option` in `section`, if present.
    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .get(&section.to_lowercase())?
            .get(&option.to_lowercase())?
            .as_deref()
    }

    /// Value of `option` in `section`, failing when either is missing.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::MissingSection` or
    /// `DiscoveryError::MissingOption`.
    pub fn require(&self, section: &str, option: &str) -> Result<&str> {
        if !self.has_section(section) {
            return Err(DiscoveryError::MissingSection {
                path: self.path.clone(),
                section: section.to_string(),
            }
            .into());
        }
        self.get(section, option).ok_or_else(|| {
            DiscoveryError::MissingOption {
                path: self.path.clone(),
                section: section.to_string(),
                option: option.to_string(),
            }
            .into()
        })
    }

    /// A multi-line option split into trimmed, non-empty lines.
    pub fn lines(&self, section: &str, option: &str) -> Result<Vec<String>> {
        Ok(self
            .require(section, option)?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}
