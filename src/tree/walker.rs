//! Walker - iterative directories-first pre-order traversal

use crate::error::WalkError;
use crate::stack::Stack;
use crate::storage::{Metadata, Storage};

use super::traversal::{order_children, push_children};

/// How a walk ended. Neither variant is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every reachable entry was visited.
    Completed,
    /// The callback returned false.
    Stopped,
}

/// Walks a [`Storage`] depth-first, visiting each directory before its
/// children and all sibling directories before sibling files.
///
/// The walker holds no traversal state of its own: every call allocates a
/// fresh stack, so one walker can be reused and, when `S: Sync`, shared
/// between threads. Symlink loops are not detected.
#[derive(Debug, Clone)]
pub struct Walker<S> {
    storage: S,
}

impl<S: Storage> Walker<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Walk `root`, handing every stat and list failure to `visit`.
    ///
    /// `visit` receives the path, its metadata if stat succeeded, and the
    /// failure if any. A directory may be visited twice: once for its stat
    /// and again with [`WalkError::List`] if its children cannot be listed.
    /// Returning false from any call ends the walk immediately; returning
    /// true after a list failure skips that directory's children.
    pub fn walk<F>(&self, root: &str, mut visit: F) -> WalkOutcome
    where
        F: FnMut(&str, Option<&S::Metadata>, Option<WalkError<S::Error>>) -> bool,
    {
        let mut stack = Stack::new();
        stack.push(root.to_string());

        while !stack.is_empty() {
            let path = stack.pop();
            log::trace!("visiting {path}");

            let entry = match self.storage.stat(&path) {
                Ok(entry) => entry,
                Err(err) => {
                    log::debug!("stat failed for {path}: {err}");
                    if !visit(&path, None, Some(WalkError::Stat(err))) {
                        return stopped(&path);
                    }
                    continue;
                }
            };

            if !visit(&path, Some(&entry), None) {
                return stopped(&path);
            }
            if !entry.is_dir() {
                continue;
            }

            let mut children = match self.storage.list_children(&path) {
                Ok(children) => children,
                Err(err) => {
                    log::debug!("list failed for {path}: {err}");
                    if !visit(&path, Some(&entry), Some(WalkError::List(err))) {
                        return stopped(&path);
                    }
                    continue;
                }
            };

            order_children(&mut children);
            push_children(&mut stack, &self.storage, &path, &children);
        }

        WalkOutcome::Completed
    }

    /// Walk `root`, aborting on the first stat or list failure.
    ///
    /// Same order as [`Walker::walk`], but `visit` only sees successful
    /// entries. The first failure is returned unmodified and no further
    /// entries are visited.
    pub fn try_walk<F>(
        &self,
        root: &str,
        mut visit: F,
    ) -> Result<WalkOutcome, WalkError<S::Error>>
    where
        F: FnMut(&str, &S::Metadata) -> bool,
    {
        let mut failure = None;
        let outcome = self.walk(root, |path, entry, err| {
            if let Some(err) = err {
                failure = Some(err);
                return false;
            }
            // Without an error, stat succeeded and metadata is present
            entry.is_some_and(|entry| visit(path, entry))
        });

        match failure {
            Some(err) => Err(err),
            None => Ok(outcome),
        }
    }
}

fn stopped(path: &str) -> WalkOutcome {
    log::debug!("walk stopped at {path}");
    WalkOutcome::Stopped
}
