//! pwstore - hierarchical secret store.
//!
//! A storage directory holds any number of backends. A backend is a
//! directory containing a `storage.conf` marker; every other file below it
//! is an entry whose key is its `/`-separated relative path. The first line
//! of an entry is its password.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── list          # Tree of matching keys
//! │   ├── get           # Password of the first match
//! │   ├── show          # Whole entry of the first match
//! │   ├── create        # New entry from stdin
//! │   ├── clipboard     # pbcopy / xsel integration
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Global configuration file
//!     ├── settings      # storage.conf parsing
//!     ├── matcher       # Key matching
//!     ├── tree          # Tree builder and renderer
//!     ├── registry      # Backend discovery and cache
//!     ├── cipher/       # Encryption primitives
//!     │   ├── mod       # Cipher trait
//!     │   └── gpg       # gpg binary implementation
//!     └── store/        # Storage backends
//!         ├── mod       # Storage trait
//!         ├── walk      # Key walks and path tracking
//!         ├── cleartext # Plain files
//!         ├── gpg       # Encrypted files
//!         └── backend   # Backend factory
//! ```
//!
//! # Example
//!
//! ```no_run
//! use pwstore::core::matcher::{self, MatchMode};
//! use pwstore::core::registry;
//! use pwstore::core::tree::Tree;
//!
//! # fn main() -> pwstore::error::Result<()> {
//! let registry = registry::backends(std::path::Path::new("/srv/secrets"))?;
//! let matcher = matcher::build("email", MatchMode::Regex)?;
//! let mut tree = Tree::new();
//! registry.filter(&mut tree, matcher.as_deref())?;
//! print!("{tree}");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
