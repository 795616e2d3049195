//! Error types.
//!
//! Each layer owns a focused error enum; [`Error`] wraps them so callers can
//! propagate everything with `?` and still match on the kind that matters.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by library and CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("clipboard: {0}")]
    Clipboard(String),

    /// No entry matched a lookup. Only the CLI turns a miss into an error.
    #[error("no entry matches '{0}'")]
    NoMatch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Global configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("home directory could not be determined")]
    NoHome,
}

/// Errors raised while scanning for backends.
///
/// Everything except [`DiscoveryError::RootMissing`] is recovered from during
/// discovery: the offending directory is logged and skipped.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("storage directory not found: {0}")]
    RootMissing(PathBuf),

    #[error("malformed {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("no [{section}] section in {path}")]
    MissingSection { path: PathBuf, section: String },

    #[error("no option '{option}' in section [{section}] of {path}")]
    MissingOption {
        path: PathBuf,
        section: String,
        option: String,
    },

    #[error("unknown backend type '{kind}' in {path}. Supported: cleartext, gpg")]
    UnknownType { path: PathBuf, kind: String },
}

/// Entry storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("entry already exists: {0}")]
    AlreadyExists(String),

    #[error("path conflict: {0} exists and is not a directory")]
    PathConflict(PathBuf),

    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("no such storage: {0}")]
    UnknownBackend(String),
}

/// Encryption capability errors.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Some configured recipients are not in the keyring.
    #[error("missing keys in keychain: {}", missing.join(", "))]
    MissingKeys { missing: Vec<String> },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("listing keys failed: {0}")]
    KeyListing(String),
}

/// Misuse of the tree protocol.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TreeError {
    #[error("tree event '{0}' without an open backend")]
    NoBackend(&'static str),

    #[error("backend '{0}' is still open")]
    BackendOpen(String),

    #[error("end_sub called with no open directory")]
    Unbalanced,
}

pub type Result<T> = std::result::Result<T, Error>;
