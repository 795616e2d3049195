//! Test support utilities for pwstore integration tests.
//!
//! Provides reusable storage fixtures and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own storage directory and home directory. Child
/// processes receive both through arguments and environment, so tests can
/// run in parallel.
pub struct Test {
    /// Storage directory scanned for backends
    pub storage: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let storage = TempDir::new().expect("failed to create temp storage");
        let home = TempDir::new().expect("failed to create temp home");

        Self { storage, home }
    }

    /// Create a test environment holding the `personal` sample backend.
    pub fn sample() -> Self {
        let t = Self::new();
        t.backend("personal", CLEARTEXT_CONF);
        for (key, content) in SAMPLE_ENTRIES {
            t.entry("personal", key, content);
        }
        t
    }

    /// Path of a backend directory.
    pub fn backend_dir(&self, name: &str) -> PathBuf {
        self.storage.path().join(name)
    }

    /// Create a backend directory with the given marker content.
    pub fn backend(&self, name: &str, conf: &str) -> PathBuf {
        let dir = self.backend_dir(name);
        fs::create_dir_all(&dir).expect("failed to create backend dir");
        fs::write(dir.join("storage.conf"), conf).expect("failed to write storage.conf");
        dir
    }

    /// Write an entry file directly, bypassing the CLI.
    pub fn entry(&self, backend: &str, key: &str, content: &str) -> PathBuf {
        let path = self.backend_dir(backend).join(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create entry parent");
        }
        fs::write(&path, content).expect("failed to write entry");
        path
    }

    /// Read an entry file directly.
    pub fn read(&self, backend: &str, key: &str) -> String {
        fs::read_to_string(self.backend_dir(backend).join(key)).expect("failed to read entry")
    }

    /// Path of the storage directory.
    pub fn root(&self) -> &Path {
        self.storage.path()
    }
}
