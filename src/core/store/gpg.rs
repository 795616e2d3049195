//! GPG-encrypted storage.
//!
//! Wraps a [`Cleartext`] store: traversal, listing and matching are
//! unchanged, entry content is encrypted on write and decrypted on read.
//!
//! ```text
//! [backend]
//! type = gpg
//!
//! [gpg]
//! keys =
//!     Alice <alice@example.com>
//!     0123456789ABCDEF
//! gpg-binary = /usr/local/bin/gpg2
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Cleartext, Storage};
use crate::core::cipher::{Cipher, GpgCli};
use crate::core::constants::DEFAULT_GPG_BINARY;
use crate::core::settings::Settings;
use crate::error::{CipherError, Result};

/// Encrypted storage for a fixed set of recipients.
pub struct Gpg {
    inner: Cleartext,
    cipher: Box<dyn Cipher>,
    /// Configured recipient identities.
    identities: Vec<String>,
    /// Identities found in the keyring, mapped to their fingerprint.
    resolved: BTreeMap<String, String>,
}

impl Gpg {
    /// Wrap `inner`, resolving `identities` against `cipher`'s keys.
    ///
    /// A keyring that cannot be listed leaves every identity unresolved;
    /// reads still work, writes fail with `MissingKeys`.
    pub fn new(inner: Cleartext, identities: Vec<String>, cipher: Box<dyn Cipher>) -> Self {
        let keys = cipher.keys().unwrap_or_else(|e| {
            warn!(backend = inner.name(), error = %e, "could not list keys");
            Vec::new()
        });

        let resolved: BTreeMap<String, String> = identities
            .iter()
            .filter_map(|identity| {
                keys.iter()
                    .find(|key| key.is_named_by(identity))
                    .map(|key| (identity.clone(), key.fingerprint.clone()))
            })
            .collect();

        debug!(
            backend = inner.name(),
            cipher = cipher.name(),
            configured = identities.len(),
            resolved = resolved.len(),
            "resolved recipients"
        );

        Self {
            inner,
            cipher,
            identities,
            resolved,
        }
    }

    /// Build from a backend root and its `[gpg]` settings.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::MissingSection`/`MissingOption` if
    /// `[gpg] keys` is absent.
    pub fn from_settings(root: impl Into<PathBuf>, settings: &Settings) -> Result<Self> {
        let identities = settings.lines("gpg", "keys")?;
        let binary = settings
            .get("gpg", "gpg-binary")
            .unwrap_or(DEFAULT_GPG_BINARY);

        Ok(Self::new(
            Cleartext::new(root),
            identities,
            Box::new(GpgCli::new(binary)),
        ))
    }

    /// Configured identities with no matching key.
    pub fn missing(&self) -> Vec<String> {
        self.identities
            .iter()
            .filter(|identity| !self.resolved.contains_key(*identity))
            .cloned()
            .collect()
    }

    fn encrypt(&self, plaintext: &str) -> Result<String> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CipherError::MissingKeys { missing }.into());
        }

        let mut fingerprints: Vec<String> = self.resolved.values().cloned().collect();
        fingerprints.sort();
        fingerprints.dedup();
        self.cipher.encrypt(plaintext, &fingerprints)
    }
}

impl fmt::Debug for Gpg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gpg")
            .field("inner", &self.inner)
            .field("cipher", &self.cipher.name())
            .field("identities", &self.identities)
            .field("resolved", &self.resolved)
            .finish()
    }
}

impl Storage for Gpg {
    fn root(&self) -> &Path {
        self.inner.root()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn read(&self, key: &str) -> Result<String> {
        let ciphertext = self.inner.read(key)?;
        self.cipher.decrypt(&ciphertext)
    }

    /// Encrypt first, then write; a failed encryption writes nothing.
    fn write(&self, key: &str, content: &str) -> Result<()> {
        let ciphertext = self.encrypt(content)?;
        self.inner.write(key, &ciphertext)
    }
}
