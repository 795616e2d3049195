//! Show command: print the first matching entry.

use zeroize::Zeroizing;

use crate::core::matcher::{self, MatchMode};
use crate::core::registry::Registry;
use crate::error::{Error, Result};

/// Print the whole entry matching `pattern`.
pub fn execute(registry: &Registry, pattern: &str, mode: MatchMode) -> Result<()> {
    let matcher = matcher::build(pattern, mode)?;
    let entry = registry
        .find_entry(matcher.as_deref())?
        .map(Zeroizing::new)
        .ok_or_else(|| Error::NoMatch(pattern.to_string()))?;

    if entry.ends_with('\n') {
        print!("{}", entry.as_str());
    } else {
        println!("{}", entry.as_str());
    }
    Ok(())
}
