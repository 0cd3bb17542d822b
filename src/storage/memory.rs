//! In-memory storage with injectable failures

use std::collections::{HashMap, VecDeque};

use serde::Deserialize;
use thiserror::Error;

use super::{Metadata, Storage, join_path};

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("{path}: no such file or directory")]
    NotFound { path: String },

    #[error("{path}: permission denied")]
    PermissionDenied { path: String },

    #[error("{path}: not a directory")]
    NotADirectory { path: String },

    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMetadata {
    name: String,
    is_dir: bool,
    size: u64,
}

impl Metadata for MemoryMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    is_dir: bool,
    size: u64,
    /// Full paths of direct children, in insertion order.
    children: Vec<String>,
    fail_stat: bool,
    fail_list: bool,
}

impl MemoryNode {
    fn new(is_dir: bool, size: u64) -> Self {
        Self {
            is_dir,
            size,
            children: Vec::new(),
            fail_stat: false,
            fail_list: false,
        }
    }
}

/// Fixture shape accepted by [`MemoryStorage::from_json`].
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum FixtureNode {
    File {
        name: String,
        #[serde(default)]
        size: u64,
        #[serde(default)]
        stat_error: bool,
    },
    Dir {
        name: String,
        #[serde(default)]
        children: Vec<FixtureNode>,
        #[serde(default)]
        stat_error: bool,
        #[serde(default)]
        list_error: bool,
    },
}

/// A virtual tree held in memory, keyed by `/`-separated paths.
///
/// Built up front with the `with_*` methods and read-only afterwards, so one
/// instance can back any number of concurrent walks. Children are listed in
/// insertion order. Inserting a path creates its missing ancestors as
/// directories.
///
/// ```
/// use treewalk::{MemoryStorage, Storage};
///
/// let storage = MemoryStorage::new()
///     .with_file("a/b/c", 10)
///     .with_list_error("a/b");
/// assert!(storage.stat("a/b").is_ok());
/// assert!(storage.list_children("a/b").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    nodes: HashMap<String, MemoryNode>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tree from JSON, e.g.
    /// `{"type":"dir","name":"a","children":[{"type":"file","name":"b","size":3}]}`.
    ///
    /// Nodes may set `stat_error`, and directories `list_error`, to inject failures.
    pub fn from_json(json: &str) -> Result<Self, MemoryError> {
        let root: FixtureNode = serde_json::from_str(json)?;
        let mut storage = Self::new();

        // Breadth-first so siblings keep their declared order
        let mut pending = VecDeque::from([(String::new(), root)]);
        while let Some((parent, node)) = pending.pop_front() {
            match node {
                FixtureNode::File {
                    name,
                    size,
                    stat_error,
                } => {
                    let path = join_path(&parent, &name);
                    storage.insert(&path, false, size);
                    if stat_error {
                        storage = storage.with_stat_error(&path);
                    }
                }
                FixtureNode::Dir {
                    name,
                    children,
                    stat_error,
                    list_error,
                } => {
                    let path = join_path(&parent, &name);
                    storage.insert(&path, true, 0);
                    if stat_error {
                        storage = storage.with_stat_error(&path);
                    }
                    if list_error {
                        storage = storage.with_list_error(&path);
                    }
                    pending.extend(children.into_iter().map(|child| (path.clone(), child)));
                }
            }
        }

        Ok(storage)
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.insert(path, true, 0);
        self
    }

    pub fn with_file(mut self, path: &str, size: u64) -> Self {
        self.insert(path, false, size);
        self
    }

    /// Make `stat(path)` fail. Missing paths are created as directories.
    pub fn with_stat_error(mut self, path: &str) -> Self {
        self.node_mut(path).fail_stat = true;
        self
    }

    /// Make `list_children(path)` fail. Missing paths are created as directories.
    pub fn with_list_error(mut self, path: &str) -> Self {
        self.node_mut(path).fail_list = true;
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node_mut(&mut self, path: &str) -> &mut MemoryNode {
        if !self.nodes.contains_key(path) {
            self.insert(path, true, 0);
        }
        self.nodes
            .entry(path.to_string())
            .or_insert_with(|| MemoryNode::new(true, 0))
    }

    fn insert(&mut self, path: &str, is_dir: bool, size: u64) {
        if let Some(node) = self.nodes.get_mut(path) {
            node.is_dir = is_dir;
            node.size = size;
            return;
        }

        // Collect missing ancestors without recursing, deepest first
        let mut missing = vec![path.to_string()];
        let mut current = path;
        while let Some((parent, _)) = current.rsplit_once('/') {
            if parent.is_empty() || self.nodes.contains_key(parent) {
                break;
            }
            missing.push(parent.to_string());
            current = parent;
        }

        for (i, p) in missing.into_iter().enumerate().rev() {
            let node = if i == 0 {
                MemoryNode::new(is_dir, size)
            } else {
                MemoryNode::new(true, 0)
            };
            if let Some((parent, _)) = p.rsplit_once('/') {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.push(p.clone());
                }
            }
            self.nodes.insert(p, node);
        }
    }

    fn metadata(&self, path: &str, node: &MemoryNode) -> MemoryMetadata {
        let name = path.rsplit_once('/').map_or(path, |(_, name)| name);
        MemoryMetadata {
            name: name.to_string(),
            is_dir: node.is_dir,
            size: if node.is_dir { 0 } else { node.size },
        }
    }
}

impl Storage for MemoryStorage {
    type Metadata = MemoryMetadata;
    type Error = MemoryError;

    fn stat(&self, path: &str) -> Result<MemoryMetadata, MemoryError> {
        let node = self.nodes.get(path).ok_or_else(|| MemoryError::NotFound {
            path: path.to_string(),
        })?;
        if node.fail_stat {
            return Err(MemoryError::PermissionDenied {
                path: path.to_string(),
            });
        }
        Ok(self.metadata(path, node))
    }

    fn list_children(&self, path: &str) -> Result<Vec<MemoryMetadata>, MemoryError> {
        let node = self.nodes.get(path).ok_or_else(|| MemoryError::NotFound {
            path: path.to_string(),
        })?;
        if node.fail_list {
            return Err(MemoryError::PermissionDenied {
                path: path.to_string(),
            });
        }
        if !node.is_dir {
            return Err(MemoryError::NotADirectory {
                path: path.to_string(),
            });
        }

        Ok(node
            .children
            .iter()
            .filter_map(|child| self.nodes.get(child).map(|n| self.metadata(child, n)))
            .collect())
    }
}
