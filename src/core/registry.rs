//! Backend discovery.
//!
//! A storage directory holds any number of backends. A backend is a
//! directory containing `storage.conf`; it owns everything below it, so
//! discovery never looks inside one (nested backends are not supported).
//!
//! ```text
//! ~/.pwstore/storage/
//! ├── personal/        # backend "personal"
//! │   ├── storage.conf
//! │   └── email/gmail
//! └── work/
//!     └── team/        # backend "team"
//!         └── storage.conf
//! ```
//!
//! Backends are indexed by directory basename. Two backends with the same
//! basename collide: the one discovered later replaces the earlier one.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::{debug, error, warn};
use walkdir::WalkDir;

use crate::core::constants::CONFIG_FILE_NAME;
use crate::core::matcher::Matcher;
use crate::core::store::{Backend, Storage};
use crate::core::tree::TreeSink;
use crate::error::{DiscoveryError, Result, StoreError};

/// Backends of one storage directory, in discovery order.
#[derive(Debug, Default)]
pub struct Registry {
    backends: IndexMap<String, Backend>,
}

impl Registry {
    /// Scan `root` for backends.
    ///
    /// Directories whose marker file is malformed, incomplete or names an
    /// unknown type are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::RootMissing` if `root` is not a directory.
    pub fn discover(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(DiscoveryError::RootMissing(root.to_path_buf()).into());
        }
        debug!(root = %root.display(), "discovering backends");

        let mut registry = Self::default();

        let mut walker = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.') {
                walker.skip_current_dir();
                continue;
            }
            if !entry.path().join(CONFIG_FILE_NAME).is_file() {
                continue;
            }

            // A backend owns its whole subtree.
            walker.skip_current_dir();
            debug!(path = %entry.path().display(), "found backend");

            match Backend::load(entry.path()) {
                Ok(backend) => registry.insert(backend),
                Err(e) => error!(path = %entry.path().display(), error = %e, "skipping backend"),
            }
        }

        debug!(count = registry.len(), "discovery finished");
        Ok(registry)
    }

    fn insert(&mut self, backend: Backend) {
        let name = backend.name().to_string();
        let root = backend.root().to_path_buf();
        if let Some(previous) = self.backends.insert(name.clone(), backend) {
            warn!(
                name = %name,
                replaced = %previous.root().display(),
                by = %root.display(),
                "duplicate backend name"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Backend> {
        self.backends.get(name)
    }

    /// Backend called `name`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UnknownBackend` if there is none.
    pub fn require(&self, name: &str) -> Result<&Backend> {
        self.get(name)
            .ok_or_else(|| StoreError::UnknownBackend(name.to_string()).into())
    }

    /// Backend names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.backends.keys().map(String::as_str)
    }

    /// Backends in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Backend> {
        self.backends.values()
    }

    /// Drive every backend's filtered traversal into `sink`.
    pub fn filter(&self, sink: &mut dyn TreeSink, matcher: Option<&dyn Matcher>) -> Result<()> {
        for backend in self.iter() {
            backend.filter(sink, matcher)?;
        }
        Ok(())
    }

    /// Password of the first match, trying backends in discovery order.
    pub fn find_password(&self, matcher: Option<&dyn Matcher>) -> Result<Option<String>> {
        for backend in self.iter() {
            if let Some(password) = backend.get_password(matcher)? {
                return Ok(Some(password));
            }
        }
        Ok(None)
    }

    /// Entry of the first match, trying backends in discovery order.
    pub fn find_entry(&self, matcher: Option<&dyn Matcher>) -> Result<Option<String>> {
        for backend in self.iter() {
            if let Some(entry) = backend.get_entry(matcher)? {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

static REGISTRIES: Lazy<Mutex<HashMap<PathBuf, Arc<Registry>>>> = Lazy::new(Default::default);

/// Backends of `root`, discovered once per process.
///
/// The result is cached under the canonical path of `root` and never
/// refreshed: backends added later are not seen until restart.
///
/// # Errors
///
/// Returns `DiscoveryError::RootMissing` if `root` does not exist.
pub fn backends(root: &Path) -> Result<Arc<Registry>> {
    let root = fs::canonicalize(root).map_err(|_| DiscoveryError::RootMissing(root.to_path_buf()))?;

    let mut cache = REGISTRIES.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(registry) = cache.get(&root) {
        return Ok(Arc::clone(registry));
    }

    let registry = Arc::new(Registry::discover(&root)?);
    cache.insert(root, Arc::clone(&registry));
    Ok(registry)
}
