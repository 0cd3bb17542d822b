//! Directory tree walking logic
//!
//! `Walker` drives an iterative pre-order traversal over any [`Storage`],
//! using an explicit stack instead of recursion. It offers two calling
//! conventions over the same algorithm:
//!
//! - `Walker::walk`: failures are passed to the callback, which decides
//!   whether to continue
//! - `Walker::try_walk`: the first failure aborts the walk and is returned
//!
//! [`Storage`]: crate::storage::Storage

mod traversal;
mod walker;

pub use walker::{WalkOutcome, Walker};
