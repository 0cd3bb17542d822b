//! Errors surfaced while walking a tree

use thiserror::Error;

/// A storage failure encountered during traversal.
///
/// Both variants wrap the storage error unmodified: `Display` and `source()`
/// are forwarded, so the message seen by the caller is the storage's own.
#[derive(Debug, Error)]
pub enum WalkError<E>
where
    E: std::error::Error + 'static,
{
    /// Metadata for a path could not be retrieved.
    #[error(transparent)]
    Stat(E),

    /// A directory's children could not be listed.
    #[error(transparent)]
    List(E),
}

impl<E> WalkError<E>
where
    E: std::error::Error + 'static,
{
    pub fn is_stat(&self) -> bool {
        matches!(self, WalkError::Stat(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, WalkError::List(_))
    }

    /// Borrow the underlying storage error.
    pub fn get_ref(&self) -> &E {
        match self {
            WalkError::Stat(e) | WalkError::List(e) => e,
        }
    }

    /// Unwrap into the underlying storage error.
    pub fn into_inner(self) -> E {
        match self {
            WalkError::Stat(e) | WalkError::List(e) => e,
        }
    }
}
