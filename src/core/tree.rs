//! Tree builder and renderer.
//!
//! Backends report their filtered structure through [`TreeSink`]; [`Tree`]
//! accumulates it in an index arena and prints it with box-drawing
//! connectors:
//!
//! ```text
//! personal
//! ├── email
//! │   ├── gmail
//! │   └── work
//! │       └── vpn
//! └── notes
//! ```
//!
//! Directories and backends that end up without children are removed at the
//! moment they are closed, so a tree printed after a failed traversal is
//! still consistent.

use std::fmt::{self, Write as _};

use crate::error::TreeError;

/// The event protocol backends use to describe their layout.
pub trait TreeSink {
    /// Open a backend under the implicit root.
    fn start_backend(&mut self, name: &str) -> Result<(), TreeError>;

    /// Open a directory under the current node.
    fn start_sub(&mut self, name: &str) -> Result<(), TreeError>;

    /// Close the current directory, dropping it if it has no children.
    fn end_sub(&mut self) -> Result<(), TreeError>;

    /// Add a key leaf to the current node.
    fn key(&mut self, name: &str) -> Result<(), TreeError>;

    /// Close every open directory and then the backend itself.
    fn end_backend(&mut self) -> Result<(), TreeError>;
}

const RESET: &str = "\x1b[0m";
const BACKEND_COLOR: &str = "\x1b[91m";
const DIRECTORY_COLOR: &str = "\x1b[94m";

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Backend,
    Directory,
    Key,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    children: Vec<usize>,
}

impl Node {
    fn new(kind: NodeKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            children: Vec::new(),
        }
    }
}

/// In-memory tree built from [`TreeSink`] events.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    /// Open backend followed by open directories, outermost first.
    open: Vec<usize>,
    colors: bool,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Empty tree rendering without ANSI colors.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, "")],
            open: Vec::new(),
            colors: false,
        }
    }

    /// Empty tree, colored when `colors` is set.
    pub fn with_colors(colors: bool) -> Self {
        Self {
            colors,
            ..Self::new()
        }
    }

    /// True when no backend survived pruning.
    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    /// Number of currently open nodes (backend plus directories).
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Backend nodes in insertion order.
    pub fn backends(&self) -> impl Iterator<Item = &Node> {
        self.children_of(&self.nodes[ROOT])
    }

    /// Children of `node` in insertion order.
    pub fn children_of<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> {
        node.children.iter().map(move |&id| &self.nodes[id])
    }

    fn current(&self, event: &'static str) -> Result<usize, TreeError> {
        self.open.last().copied().ok_or(TreeError::NoBackend(event))
    }

    fn push(&mut self, parent: usize, kind: NodeKind, name: &str) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::new(kind, name));
        self.nodes[parent].children.push(id);
        id
    }

    /// Prune `id` from `parent` if it ended up childless.
    fn close(&mut self, parent: usize, id: usize) {
        if !self.nodes[id].children.is_empty() {
            return;
        }
        self.nodes[parent].children.retain(|&child| child != id);
        // A childless node is always the newest one in the arena.
        if id + 1 == self.nodes.len() {
            self.nodes.pop();
        }
    }

    fn label(&self, node: &Node) -> String {
        let color = match node.kind {
            NodeKind::Backend => BACKEND_COLOR,
            NodeKind::Directory => DIRECTORY_COLOR,
            NodeKind::Key | NodeKind::Root => return node.name.clone(),
        };
        if self.colors {
            format!("{color}{}{RESET}", node.name)
        } else {
            node.name.clone()
        }
    }

    fn write_children(&self, out: &mut String, node: &Node, prefix: &str) -> fmt::Result {
        let count = node.children.len();
        for (i, child) in self.children_of(node).enumerate() {
            let last = i + 1 == count;
            let connector = if last { LAST_BRANCH } else { BRANCH };
            writeln!(out, "{prefix}{connector}{}", self.label(child))?;

            if !child.children.is_empty() {
                let continuation = if last { SPACE } else { PIPE };
                self.write_children(out, child, &format!("{prefix}{continuation}"))?;
            }
        }
        Ok(())
    }

    /// Render the tree to a string, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for backend in self.backends() {
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{}", self.label(backend));
            let _ = self.write_children(&mut out, backend, "");
        }
        out
    }
}

impl TreeSink for Tree {
    fn start_backend(&mut self, name: &str) -> Result<(), TreeError> {
        if let Some(&backend) = self.open.first() {
            return Err(TreeError::BackendOpen(self.nodes[backend].name.clone()));
        }
        let id = self.push(ROOT, NodeKind::Backend, name);
        self.open.push(id);
        Ok(())
    }

    fn start_sub(&mut self, name: &str) -> Result<(), TreeError> {
        let parent = self.current("start_sub")?;
        let id = self.push(parent, NodeKind::Directory, name);
        self.open.push(id);
        Ok(())
    }

    fn end_sub(&mut self) -> Result<(), TreeError> {
        match self.open.len() {
            0 => Err(TreeError::NoBackend("end_sub")),
            1 => Err(TreeError::Unbalanced),
            _ => {
                let id = self.open.pop().ok_or(TreeError::Unbalanced)?;
                let parent = self.current("end_sub")?;
                self.close(parent, id);
                Ok(())
            }
        }
    }

    fn key(&mut self, name: &str) -> Result<(), TreeError> {
        let parent = self.current("key")?;
        self.push(parent, NodeKind::Key, name);
        Ok(())
    }

    fn end_backend(&mut self) -> Result<(), TreeError> {
        if self.open.is_empty() {
            return Err(TreeError::NoBackend("end_backend"));
        }
        while self.open.len() > 1 {
            self.end_sub()?;
        }
        if let Some(backend) = self.open.pop() {
            self.close(ROOT, backend);
        }
        Ok(())
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
