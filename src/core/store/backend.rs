//! Backend selection from marker settings.
//!
//! The `type` option of `[backend]` names a [`BackendKind`]; [`Backend`] is
//! the closed set of storage variants built from it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use super::{Cleartext, Gpg, Storage};
use crate::core::settings::Settings;
use crate::error::{DiscoveryError, Result};

/// Supported backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Cleartext,
    Gpg,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cleartext => "cleartext",
            Self::Gpg => "gpg",
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "cleartext" => Ok(Self::Cleartext),
            "gpg" => Ok(Self::Gpg),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum Variant {
    Cleartext(Cleartext),
    Gpg(Gpg),
}

/// A discovered backend.
#[derive(Debug)]
pub struct Backend {
    variant: Variant,
}

impl Backend {
    /// Build the backend rooted at `root` described by `settings`.
    ///
    /// # Errors
    ///
    /// Returns a `DiscoveryError` when `[backend] type` is missing or
    /// unknown, or when the variant's own settings are incomplete.
    pub fn open(root: impl Into<PathBuf>, settings: &Settings) -> Result<Self> {
        let root = root.into();
        let kind: BackendKind = settings
            .require("backend", "type")?
            .parse()
            .map_err(|kind| DiscoveryError::UnknownType {
                path: settings.path().to_path_buf(),
                kind,
            })?;

        debug!(root = %root.display(), kind = %kind, "opening backend");
        let variant = match kind {
            BackendKind::Cleartext => Variant::Cleartext(Cleartext::new(root)),
            BackendKind::Gpg => Variant::Gpg(Gpg::from_settings(root, settings)?),
        };
        Ok(Self { variant })
    }

    /// Load `<root>/storage.conf` and build the backend.
    pub fn load(root: &Path) -> Result<Self> {
        let marker = root.join(crate::core::constants::CONFIG_FILE_NAME);
        Self::open(root, &Settings::load(&marker)?)
    }

    pub fn kind(&self) -> BackendKind {
        match self.variant {
            Variant::Cleartext(_) => BackendKind::Cleartext,
            Variant::Gpg(_) => BackendKind::Gpg,
        }
    }

    fn storage(&self) -> &dyn Storage {
        match &self.variant {
            Variant::Cleartext(s) => s,
            Variant::Gpg(s) => s,
        }
    }
}

impl Storage for Backend {
    fn root(&self) -> &Path {
        self.storage().root()
    }

    fn name(&self) -> &str {
        self.storage().name()
    }

    fn read(&self, key: &str) -> Result<String> {
        self.storage().read(key)
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        self.storage().write(key, content)
    }
}
