//! External encryption capability.
//!
//! The encrypted backend never performs cryptography itself. It talks to a
//! [`Cipher`]: something that knows a set of public keys and can encrypt to
//! them and decrypt with whatever private keys it holds.
//!
//! ## Implementations
//!
//! - **gpg**: [`GpgCli`], shelling out to the GnuPG binary.
//!
//! ## Adding a New Implementation
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::error::Result;

mod gpg;

pub use gpg::GpgCli;

/// A public key known to the cipher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// Primary key fingerprint (uppercase hex).
    pub fingerprint: String,
    /// User ids, e.g. `Alice <alice@example.com>`.
    pub uids: Vec<String>,
}

impl PublicKey {
    /// Whether `identity` names this key.
    ///
    /// An identity is an exact user id, the full fingerprint, or a key id
    /// (at least 8 hex digits, optional `0x`) that the fingerprint ends with.
    pub fn is_named_by(&self, identity: &str) -> bool {
        if self.uids.iter().any(|uid| uid == identity) {
            return true;
        }
        let hex = identity.trim_start_matches("0x").to_ascii_uppercase();
        hex.len() >= 8
            && hex.chars().all(|c| c.is_ascii_hexdigit())
            && self.fingerprint.to_ascii_uppercase().ends_with(&hex)
    }
}

/// Encryption capability used by the encrypted backend.
pub trait Cipher: Send + Sync {
    /// Implementation name for logs.
    fn name(&self) -> &str;

    /// Public keys available for encryption.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyListing` if the keyring cannot be queried.
    fn keys(&self) -> Result<Vec<PublicKey>>;

    /// Encrypt `plaintext` for every fingerprint in `recipients`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` on failure.
    fn encrypt(&self, plaintext: &str, recipients: &[String]) -> Result<String>;

    /// Decrypt `ciphertext` with any available private key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` on failure.
    fn decrypt(&self, ciphertext: &str) -> Result<String>;
}
