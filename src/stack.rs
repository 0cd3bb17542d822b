//! Generic LIFO stack used as explicit traversal state

/// A last-in-first-out stack.
///
/// Reads on an empty stack return `T::default()` instead of panicking, so a
/// `Stack<String>` yields `""` once drained.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    entries: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns true if there are no items in the stack.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Adds an item to the top of the stack.
    pub fn push(&mut self, item: T) {
        self.entries.push(item);
    }
}

impl<T: Default> Stack<T> {
    /// Removes and returns the top item, or `T::default()` if empty.
    pub fn pop(&mut self) -> T {
        self.entries.pop().unwrap_or_default()
    }
}

impl<T: Clone + Default> Stack<T> {
    /// Returns a copy of the top item without removing it, or `T::default()` if empty.
    pub fn peek(&self) -> T {
        self.entries.last().cloned().unwrap_or_default()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
