//! Errors returned by [`OrderedTree`][crate::OrderedTree] operations.

use thiserror::Error;

/// The ways an [`OrderedTree`][crate::OrderedTree] operation can fail.
///
/// Lookups that simply come up empty (`find`, `successor`, ...) return `Option` instead. Only
/// operations that require an item to be present report an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// `remove` was asked for an item the tree doesn't hold.
    #[error("item not found in tree")]
    NotFound,
}

/// Result type alias for tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
