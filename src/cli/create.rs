//! Create command: store standard input under a new key.

use std::io::{self, Read};

use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::registry::Registry;
use crate::core::store::Storage;
use crate::error::Result;

/// Create `key` in the backend named `storage` with content read from stdin.
///
/// The backend is resolved before stdin is read.
pub fn execute(registry: &Registry, storage: &str, key: &str) -> Result<()> {
    let backend = registry.require(storage)?;

    let mut content = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut content)?;

    backend.create(key, &content)?;
    output::success(&format!("created {}", output::key(&format!("{storage}/{key}"))));
    Ok(())
}
