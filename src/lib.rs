//! Treewalk - iterative directories-first tree walking over pluggable storage

pub mod error;
pub mod stack;
pub mod storage;
pub mod tree;

#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use error::WalkError;
pub use stack::Stack;
pub use storage::{
    LocalConfig, LocalMetadata, LocalStorage, MemoryError, MemoryMetadata, MemoryStorage,
    Metadata, Storage, join_path,
};
pub use tree::{WalkOutcome, Walker};
