//! Get command: print or copy the password of the first matching entry.

use zeroize::Zeroizing;

use crate::cli::{clipboard, output};
use crate::core::matcher::{self, MatchMode};
use crate::core::registry::Registry;
use crate::error::{Error, Result};

/// Print the first line of the first entry matching `pattern`.
///
/// # Errors
///
/// Returns `Error::NoMatch` when no backend has a matching key.
pub fn execute(registry: &Registry, pattern: &str, mode: MatchMode, to_clipboard: bool) -> Result<()> {
    let matcher = matcher::build(pattern, mode)?;
    let password = registry
        .find_password(matcher.as_deref())?
        .map(Zeroizing::new)
        .ok_or_else(|| Error::NoMatch(pattern.to_string()))?;

    if to_clipboard {
        clipboard::set(&password)?;
        output::success("password copied to clipboard");
    } else {
        println!("{}", password.as_str());
    }
    Ok(())
}
