//! List command: render matching keys of every backend as a tree.

use crate::cli::output;
use crate::core::matcher::{self, MatchMode};
use crate::core::registry::Registry;
use crate::core::tree::Tree;
use crate::error::Result;

/// Print the keys matching `pattern`; an empty pattern lists everything.
pub fn execute(registry: &Registry, pattern: &str, mode: MatchMode) -> Result<()> {
    let matcher = matcher::build(pattern, mode)?;

    let mut tree = Tree::with_colors(output::colors_enabled());
    registry.filter(&mut tree, matcher.as_deref())?;

    if tree.is_empty() {
        output::dimmed("no matching keys");
    } else {
        print!("{tree}");
    }
    Ok(())
}
