//! Storage abstraction consumed by the walker
//!
//! A [`Storage`] is any read-only hierarchical store that can stat a path and
//! list a directory's direct children. Two implementations ship with the crate:
//!
//! - [`LocalStorage`]: the native filesystem, rooted at a base directory
//! - [`MemoryStorage`]: an in-memory tree with injectable failures

mod local;
mod memory;

use std::sync::Arc;

pub use local::{LocalConfig, LocalMetadata, LocalStorage};
pub use memory::{MemoryError, MemoryMetadata, MemoryStorage};

/// Facts about a single entry, independent of its contents.
pub trait Metadata {
    fn name(&self) -> &str;
    fn is_dir(&self) -> bool;
    /// Size in bytes. Only meaningful for non-directories.
    fn size(&self) -> u64;
}

/// Read-only access to a hierarchical store.
pub trait Storage {
    type Metadata: Metadata;
    type Error: std::error::Error + 'static;

    /// Fetch metadata for `path`.
    fn stat(&self, path: &str) -> Result<Self::Metadata, Self::Error>;

    /// List the direct children of the directory at `path`.
    fn list_children(&self, path: &str) -> Result<Vec<Self::Metadata>, Self::Error>;

    /// Build a child path from its parent and name.
    fn join(&self, parent: &str, name: &str) -> String {
        join_path(parent, name)
    }
}

/// Join a parent path and a child name with `/`.
///
/// No normalization: `.` and `..` segments are kept as given.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    type Metadata = S::Metadata;
    type Error = S::Error;

    fn stat(&self, path: &str) -> Result<Self::Metadata, Self::Error> {
        (**self).stat(path)
    }

    fn list_children(&self, path: &str) -> Result<Vec<Self::Metadata>, Self::Error> {
        (**self).list_children(path)
    }

    fn join(&self, parent: &str, name: &str) -> String {
        (**self).join(parent, name)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    type Metadata = S::Metadata;
    type Error = S::Error;

    fn stat(&self, path: &str) -> Result<Self::Metadata, Self::Error> {
        (**self).stat(path)
    }

    fn list_children(&self, path: &str) -> Result<Vec<Self::Metadata>, Self::Error> {
        (**self).list_children(path)
    }

    fn join(&self, parent: &str, name: &str) -> String {
        (**self).join(parent, name)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    type Metadata = S::Metadata;
    type Error = S::Error;

    fn stat(&self, path: &str) -> Result<Self::Metadata, Self::Error> {
        (**self).stat(path)
    }

    fn list_children(&self, path: &str) -> Result<Vec<Self::Metadata>, Self::Error> {
        (**self).list_children(path)
    }

    fn join(&self, parent: &str, name: &str) -> String {
        (**self).join(parent, name)
    }
}
