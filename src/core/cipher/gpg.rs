//! GPG cipher using the gpg CLI.
//!
//! ## Requirements
//!
//! - `gpg` (or the binary named by `gpg-binary`) must be installed
//! - the keyring must hold the recipients' public keys
//! - a private key for one recipient must be available to decrypt
//!
//! The child inherits the environment, so `GNUPGHOME` selects the keyring.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::trace;

use super::{Cipher, PublicKey};
use crate::error::{CipherError, Result};

/// GPG cipher backed by a gpg executable.
#[derive(Debug, Clone)]
pub struct GpgCli {
    binary: PathBuf,
}

impl GpgCli {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run gpg with `args`, feeding `input` on stdin, and return stdout.
    fn run(
        &self,
        args: &[&str],
        input: Option<&[u8]>,
        fail: fn(String) -> CipherError,
    ) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(["--batch", "--yes", "--no-tty"])
            .args(args)
            // Keep pinentry out of curses mode; we own the terminal.
            .env("PINENTRY_USER_DATA", "USE_CURSES=0")
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            fail(format!(
                "failed to spawn {}: {}. Install GnuPG from https://gnupg.org/download/",
                self.binary.display(),
                e
            ))
        })?;

        // Feed stdin from a separate thread while stdout drains; gpg stops
        // reading once its output pipe is full.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match (input, stdin) {
                (Some(bytes), Some(mut stdin)) => stdin.write_all(bytes),
                _ => Ok(()),
            });
            let output = child.wait_with_output();
            (output, writer.join())
        });

        let output = output.map_err(|e| fail(format!("gpg command failed: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(fail(stderr.trim().to_string()).into());
        }
        match written {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(fail(format!("failed to write to gpg: {}", e)).into()),
            Err(_) => return Err(fail("gpg stdin writer panicked".to_string()).into()),
        }
        Ok(output.stdout)
    }
}

impl Default for GpgCli {
    fn default() -> Self {
        Self::new(crate::core::constants::DEFAULT_GPG_BINARY)
    }
}

/// Parse `gpg --with-colons --list-keys` output.
///
/// Only primary keys are returned; subkey fingerprints are skipped.
pub(crate) fn parse_colons(listing: &str) -> Vec<PublicKey> {
    let mut keys = Vec::new();
    let mut current: Option<PublicKey> = None;
    let mut in_subkey = false;

    for line in listing.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields.first().copied() {
            Some("pub") => {
                keys.extend(current.take());
                current = Some(PublicKey {
                    fingerprint: String::new(),
                    uids: Vec::new(),
                });
                in_subkey = false;
            }
            Some("sub") => in_subkey = true,
            Some("fpr") if !in_subkey => {
                if let (Some(key), Some(fpr)) = (current.as_mut(), fields.get(9)) {
                    if key.fingerprint.is_empty() {
                        key.fingerprint = fpr.to_string();
                    }
                }
            }
            Some("uid") => {
                if let (Some(key), Some(uid)) = (current.as_mut(), fields.get(9)) {
                    key.uids.push(uid.replace("\\x3a", ":"));
                }
            }
            _ => {}
        }
    }
    keys.extend(current);
    keys
}

impl Cipher for GpgCli {
    fn name(&self) -> &str {
        "gpg"
    }

    fn keys(&self) -> Result<Vec<PublicKey>> {
        let stdout = self.run(
            &["--with-colons", "--fixed-list-mode", "--list-keys"],
            None,
            CipherError::KeyListing,
        )?;
        let keys = parse_colons(&String::from_utf8_lossy(&stdout));
        trace!(keys = keys.len(), "listed gpg keys");
        Ok(keys)
    }

    fn encrypt(&self, plaintext: &str, recipients: &[String]) -> Result<String> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting with GPG"
        );

        if recipients.is_empty() {
            return Err(CipherError::EncryptionFailed("no recipients provided".to_string()).into());
        }

        let mut args = vec!["--armor", "--trust-model", "always", "--encrypt"];
        for recipient in recipients {
            args.extend(["--recipient", recipient.as_str()]);
        }

        let stdout = self.run(
            &args,
            Some(plaintext.as_bytes()),
            CipherError::EncryptionFailed,
        )?;
        // Armored output is ASCII.
        let ciphertext = String::from_utf8(stdout)
            .map_err(|e| CipherError::EncryptionFailed(format!("UTF-8 error: {}", e)))?;

        trace!(ciphertext_len = ciphertext.len(), "encrypted with GPG");
        Ok(ciphertext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting with GPG");

        let stdout = self.run(
            &["--quiet", "--decrypt"],
            Some(ciphertext.as_bytes()),
            CipherError::DecryptionFailed,
        )?;
        let plaintext = String::from_utf8(stdout)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)))?;

        trace!(plaintext_len = plaintext.len(), "decrypted with GPG");
        Ok(plaintext)
    }
}
