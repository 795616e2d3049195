//! Constants used throughout pwstore.
//!
//! Centralizes magic strings and configuration values.

/// Marker file designating a backend root (storage.conf).
pub const CONFIG_FILE_NAME: &str = "storage.conf";

/// Global configuration file relative to HOME.
pub const GLOBAL_CONFIG: &str = "~/.pwstore/configuration";

/// Default storage directory relative to HOME.
pub const DEFAULT_DIRECTORY: &str = "~/.pwstore/storage";

/// Characters stripped from the end of a password line.
pub const PASSWORD_TRIM: &[char] = &['\t', '\r', '\n'];

/// gpg executable used when a backend does not override it.
pub const DEFAULT_GPG_BINARY: &str = "gpg";

/// Log filter environment variable.
pub const LOG_ENV: &str = "PWSTORE_LOG";
