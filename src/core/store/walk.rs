//! Depth-first traversal of a backend root.
//!
//! [`Walk`] yields directories and key files relative to the root, in
//! file-name order, following symbolic links. Hidden entries and marker files
//! never surface. [`PathTracker`] turns the sequence of visited directories
//! into `start_sub`/`end_sub` events so the tree sink needs no filesystem
//! knowledge.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::core::constants::CONFIG_FILE_NAME;
use crate::core::matcher::{self, Matcher};
use crate::core::tree::TreeSink;
use crate::error::TreeError;

/// One step of a backend traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Visit {
    /// A directory, as path segments below the root.
    Dir(Vec<String>),
    /// A key file.
    Key {
        key: String,
        parent: Vec<String>,
        name: String,
    },
}

/// Prunes hidden entries and names that cannot be keys.
fn is_visible(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    match entry.file_name().to_str() {
        Some(name) => !name.starts_with('.'),
        None => {
            warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            false
        }
    }
}

/// Lazy traversal of one backend root.
pub(crate) struct Walk {
    root: PathBuf,
    inner: walkdir::FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
}

impl Walk {
    pub(crate) fn new(root: &Path) -> Self {
        let visible: fn(&DirEntry) -> bool = is_visible;
        let inner = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(visible);
        Self {
            root: root.to_path_buf(),
            inner,
        }
    }

    fn visit(&self, entry: &DirEntry) -> Option<Visit> {
        let relative = entry.path().strip_prefix(&self.root).ok()?;
        let mut segments = relative
            .components()
            .map(|c| c.as_os_str().to_str().map(String::from))
            .collect::<Option<Vec<String>>>()?;

        if entry.file_type().is_dir() {
            return Some(Visit::Dir(segments));
        }
        if !entry.file_type().is_file() {
            return None;
        }

        let name = segments.pop()?;
        if name == CONFIG_FILE_NAME {
            return None;
        }
        let key = if segments.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", segments.join("/"), name)
        };
        Some(Visit::Key {
            key,
            parent: segments,
            name,
        })
    }
}

impl Iterator for Walk {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            if let Some(visit) = self.visit(&entry) {
                return Some(visit);
            }
        }
    }
}

/// Keys of a backend, optionally restricted by a matcher.
///
/// Produced by `Storage::list` and `Storage::matching_keys`; every call
/// starts a fresh traversal.
pub struct Keys<'a> {
    walk: Walk,
    matcher: Option<&'a dyn Matcher>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(root: &Path, matcher: Option<&'a dyn Matcher>) -> Self {
        Self {
            walk: Walk::new(root),
            matcher,
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Visit::Key { key, .. } = self.walk.next()? {
                if matcher::accepts(self.matcher, &key) {
                    return Some(key);
                }
            }
        }
    }
}

/// Keeps a tree sink's open directories in step with a depth-first walk.
#[derive(Debug, Default)]
pub struct PathTracker {
    open: Vec<String>,
}

impl PathTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories currently open in the sink, outermost first.
    pub fn path(&self) -> &[String] {
        &self.open
    }

    /// Move the open path to `target`: close every segment past the common
    /// prefix, then open the new ones.
    pub fn sync(&mut self, target: &[String], sink: &mut dyn TreeSink) -> Result<(), TreeError> {
        let common = self
            .open
            .iter()
            .zip(target)
            .take_while(|(open, wanted)| open == wanted)
            .count();

        while self.open.len() > common {
            sink.end_sub()?;
            self.open.pop();
        }
        for segment in &target[common..] {
            sink.start_sub(segment)?;
            self.open.push(segment.clone());
        }
        Ok(())
    }

    /// Close every open directory.
    pub fn close(&mut self, sink: &mut dyn TreeSink) -> Result<(), TreeError> {
        self.sync(&[], sink)
    }
}
