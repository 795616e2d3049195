//! Clipboard integration through platform helper binaries.
//!
//! macOS uses `pbcopy`; Linux writes the primary, secondary, and clipboard
//! selections with `xsel`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

/// Copy `text` into the system clipboard.
pub fn set(text: &str) -> Result<()> {
    for (binary, flag) in targets()? {
        feed(&binary, flag, text)?;
    }
    Ok(())
}

/// xsel flags for the primary, secondary and clipboard selections.
const XSEL_SELECTIONS: [&str; 3] = ["-pi", "-si", "-bi"];

fn targets() -> Result<Vec<(PathBuf, Option<&'static str>)>> {
    if cfg!(target_os = "macos") {
        Ok(vec![(locate("pbcopy")?, None)])
    } else if cfg!(target_os = "linux") {
        let xsel = locate("xsel")?;
        Ok(XSEL_SELECTIONS
            .iter()
            .map(|&flag| (xsel.clone(), Some(flag)))
            .collect())
    } else {
        Err(Error::Clipboard(format!(
            "no clipboard support on {}",
            std::env::consts::OS
        )))
    }
}

fn locate(binary: &str) -> Result<PathBuf> {
    which::which(binary).map_err(|e| Error::Clipboard(format!("{binary} not found: {e}")))
}

fn feed(binary: &Path, flag: Option<&str>, text: &str) -> Result<()> {
    debug!(binary = %binary.display(), ?flag, "setting clipboard");

    let mut child = Command::new(binary)
        .args(flag)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| Error::Clipboard(format!("failed to run {}: {e}", binary.display())))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| Error::Clipboard(e.to_string()))?;
    }

    let status = child
        .wait()
        .map_err(|e| Error::Clipboard(e.to_string()))?;
    if !status.success() {
        return Err(Error::Clipboard(format!(
            "{} exited with {status}",
            binary.display()
        )));
    }
    Ok(())
}
