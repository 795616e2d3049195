//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success
//! - Red: errors
//! - Cyan: keys, hints
//! - Dimmed: secondary info

use console::style;

/// Whether stdout gets colored output.
///
/// Off when NO_COLOR is set or stdout is not a terminal.
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::colors_enabled_stderr()
}

/// Print a success message with checkmark to stderr.
///
/// Example: `✓ created mail/gmail`
pub fn success(msg: &str) {
    if stderr_colors() {
        eprintln!("{} {}", style("✓").green(), msg);
    } else {
        eprintln!("✓ {}", msg);
    }
}

/// Print an error message to stderr (red).
///
/// Example: `✗ no entry matches 'gmail'`
pub fn error(msg: &str) {
    if stderr_colors() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: pwstore list`
pub fn hint(msg: &str) {
    if stderr_colors() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print secondary information to stderr (dimmed).
pub fn dimmed(msg: &str) {
    if stderr_colors() {
        eprintln!("{}", style(msg).dim());
    } else {
        eprintln!("{}", msg);
    }
}

/// Format a key name in cyan for inline use.
pub fn key(k: &str) -> String {
    if stderr_colors() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}
