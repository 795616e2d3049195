//! Cleartext storage: entries are stored as-is in files below the root.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::Storage;
use crate::error::{Result, StoreError};

/// Plain file storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct Cleartext {
    root: PathBuf,
    name: String,
}

impl Cleartext {
    /// Storage rooted at `root`. Relative roots are resolved against the
    /// current directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { root, name }
    }

    /// Make sure every directory above `key` exists.
    ///
    /// Fails with `PathConflict` when a segment exists as something other
    /// than a directory.
    fn prepare_parents(&self, key: &str) -> Result<()> {
        let mut segments: Vec<&str> = key.split('/').collect();
        segments.pop();

        let mut dir = self.root.clone();
        for segment in segments {
            dir.push(segment);
            match fs::metadata(&dir) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => return Err(StoreError::PathConflict(dir).into()),
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    info!(path = %dir.display(), "creating directory");
                    fs::create_dir(&dir)?;
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

/// Exclusively create `path` and write `bytes` through a buffered handle.
///
/// The handle is flushed and closed before returning. A file left behind by
/// a failed write is removed.
fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(path)?;

    let result = {
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes).and_then(|()| writer.flush())
    };

    if let Err(e) = &result {
        warn!(path = %path.display(), error = %e, "write failed, removing partial file");
        if let Err(rm) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %rm, "could not remove partial file");
        }
    }
    result
}

impl Storage for Cleartext {
    fn root(&self) -> &Path {
        &self.root
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, key: &str) -> Result<String> {
        let path = self.path_for_key(key);
        debug!(path = %path.display(), "reading");

        let mut content = String::new();
        File::open(&path)?.read_to_string(&mut content)?;
        Ok(content)
    }

    fn write(&self, key: &str, content: &str) -> Result<()> {
        self.prepare_parents(key)?;

        let path = self.path_for_key(key);
        debug!(path = %path.display(), bytes = content.len(), "writing");
        write_new(&path, content.as_bytes()).map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StoreError::AlreadyExists(key.to_string()).into()
            } else {
                e.into()
            }
        })
    }
}
