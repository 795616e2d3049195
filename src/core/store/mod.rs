//! Entry storage backends.
//!
//! A backend owns one directory subtree. Keys are `/`-separated paths
//! relative to its root and map one-to-one to regular files.
//!
//! The [`Storage`] trait carries the whole traversal and lookup contract as
//! provided methods; an implementation only supplies where it lives and how
//! one entry's content is read and written. That is the single seam the
//! encrypted variant intercepts.
//!
//! ## Adding a New Backend
//!
//! 1. Implement `Storage` (usually by wrapping [`Cleartext`])
//! 2. Add a variant to [`BackendKind`] and [`Backend`]
//! 3. Map its `type` string in `BackendKind::from_str`

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::{CONFIG_FILE_NAME, PASSWORD_TRIM};
use crate::core::matcher::{self, Matcher};
use crate::core::tree::TreeSink;
use crate::error::{Result, StoreError};

mod backend;
mod cleartext;
mod gpg;
mod walk;

pub use backend::{Backend, BackendKind};
pub use cleartext::Cleartext;
pub use gpg::Gpg;
pub use walk::{Keys, PathTracker};

use walk::{Visit, Walk};

/// Storage contract shared by every backend variant.
pub trait Storage {
    /// Absolute root directory.
    fn root(&self) -> &Path;

    /// Backend name (basename of the root).
    fn name(&self) -> &str;

    /// Logical content of `key`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a `CipherError`
    /// if it cannot be decoded.
    fn read(&self, key: &str) -> Result<String>;

    /// Store `content` under a new `key`. Never overwrites.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists`, `StoreError::PathConflict`, or
    /// whatever the variant's encoding step raises.
    fn write(&self, key: &str, content: &str) -> Result<()>;

    /// Filesystem path of `key`.
    fn path_for_key(&self, key: &str) -> PathBuf {
        key.split('/')
            .fold(self.root().to_path_buf(), |path, segment| path.join(segment))
    }

    /// Every key, depth-first in file-name order.
    fn list(&self) -> Keys<'_> {
        Keys::new(self.root(), None)
    }

    /// Keys accepted by `matcher`; `None` accepts all.
    fn matching_keys<'a>(&'a self, matcher: Option<&'a dyn Matcher>) -> Keys<'a> {
        Keys::new(self.root(), matcher)
    }

    /// Report the backend layout to `sink`, keeping only matching keys.
    ///
    /// Every directory is opened; the sink drops the ones left empty.
    fn filter(&self, sink: &mut dyn TreeSink, matcher: Option<&dyn Matcher>) -> Result<()> {
        debug!(backend = self.name(), "filtering keys");

        sink.start_backend(self.name())?;
        let mut tracker = PathTracker::new();
        for visit in Walk::new(self.root()) {
            match visit {
                Visit::Dir(segments) => tracker.sync(&segments, sink)?,
                Visit::Key { key, parent, name } => {
                    tracker.sync(&parent, sink)?;
                    if matcher::accepts(matcher, &key) {
                        sink.key(&name)?;
                    }
                }
            }
        }
        tracker.close(sink)?;
        sink.end_backend()?;
        Ok(())
    }

    /// Whole content of the first matching key.
    ///
    /// Returns `Ok(None)` when no key matches.
    fn get_entry(&self, matcher: Option<&dyn Matcher>) -> Result<Option<String>> {
        let Some(key) = self.matching_keys(matcher).next() else {
            return Ok(None);
        };
        debug!(backend = self.name(), key = %key, "reading entry");
        self.read(&key).map(Some)
    }

    /// First line of the first matching key, trailing `\t\r\n` stripped.
    ///
    /// Returns `Ok(None)` when no key matches and `Ok(Some(""))` when the
    /// matching entry has an empty first line.
    fn get_password(&self, matcher: Option<&dyn Matcher>) -> Result<Option<String>> {
        let Some(entry) = self.get_entry(matcher)? else {
            return Ok(None);
        };
        let entry = Zeroizing::new(entry);
        Ok(Some(password(&entry).to_string()))
    }

    /// Create a new entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidKey` for malformed keys, plus everything
    /// [`Storage::write`] returns.
    fn create(&self, key: &str, content: &str) -> Result<()> {
        validate_key(key)?;
        debug!(backend = self.name(), key, "creating entry");
        self.write(key, content)
    }
}

/// The password line of an entry.
pub fn password(entry: &str) -> &str {
    entry
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches(PASSWORD_TRIM)
}

/// Check that `key` addresses a visible, non-reserved file below a root.
///
/// # Errors
///
/// Returns `StoreError::InvalidKey` describing the first problem found.
pub fn validate_key(key: &str) -> Result<()> {
    let invalid = |reason| StoreError::InvalidKey {
        key: key.to_string(),
        reason,
    };

    if key.is_empty() {
        return Err(invalid("key is empty").into());
    }
    if key.starts_with('/') {
        return Err(invalid("key must be relative").into());
    }
    for segment in key.split('/') {
        if segment.is_empty() {
            return Err(invalid("empty path segment").into());
        }
        if segment.starts_with('.') {
            return Err(invalid("path segments must not start with '.'").into());
        }
    }
    if key.rsplit('/').next() == Some(CONFIG_FILE_NAME) {
        return Err(invalid("name is reserved for backend configuration").into());
    }
    Ok(())
}
