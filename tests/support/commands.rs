//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a pwstore command bound to this environment.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - `--directory` pointing at the temporary storage directory
    /// - colors and environment overrides cleared
    pub fn cmd(&self) -> Command {
        let mut cmd = self.bare_cmd();
        cmd.arg("--directory").arg(self.storage.path());
        cmd
    }

    /// Create a pwstore command without a storage directory override.
    pub fn bare_cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("pwstore").expect("failed to find pwstore binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("PWSTORE_LOG");
        cmd.env_remove("PWSTORE_CONFIG");
        cmd.env_remove("PWSTORE_DIRECTORY");
        cmd.current_dir(self.home.path());
        cmd
    }

    /// Shortcut for `pwstore list <pattern>`.
    pub fn list(&self, pattern: &str) -> Output {
        self.cmd()
            .args(["list", pattern])
            .output()
            .expect("failed to run pwstore list")
    }

    /// Shortcut for `pwstore get <pattern>`.
    pub fn get(&self, pattern: &str) -> Output {
        self.cmd()
            .args(["get", pattern])
            .output()
            .expect("failed to run pwstore get")
    }

    /// Shortcut for `pwstore show <pattern>`.
    pub fn show(&self, pattern: &str) -> Output {
        self.cmd()
            .args(["show", pattern])
            .output()
            .expect("failed to run pwstore show")
    }

    /// Shortcut for `pwstore create <storage> <key>` with stdin content.
    pub fn create(&self, storage: &str, key: &str, content: &str) -> Output {
        self.cmd()
            .args(["create", storage, key])
            .write_stdin(content)
            .output()
            .expect("failed to run pwstore create")
    }
}
