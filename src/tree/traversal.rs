//! Child ordering shared by both walk entry points.

use crate::stack::Stack;
use crate::storage::{Metadata, Storage};

/// Move all directories ahead of all non-directories.
///
/// The sort is stable, so entries of the same kind keep the order the
/// storage listed them in.
pub fn order_children<M: Metadata>(children: &mut [M]) {
    children.sort_by_key(|entry| !entry.is_dir());
}

/// Push child paths so that popping yields them in `children` order.
pub fn push_children<S: Storage>(
    stack: &mut Stack<String>,
    storage: &S,
    parent: &str,
    children: &[S::Metadata],
) {
    for child in children.iter().rev() {
        stack.push(storage.join(parent, child.name()));
    }
}
