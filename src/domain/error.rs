//! Error types for the ztodo plugin.
//!
//! This module defines the centralized error type [`TodoError`] and a type alias
//! [`Result`] used throughout the crate. The variants double as the failure
//! taxonomy of the item controller: validation and lookup failures are reported
//! as errors by the collection store and degraded to silent no-ops by the event
//! handler, while persistence failures are logged and never touch in-memory state.

use crate::domain::item::ItemId;
use thiserror::Error;

/// The main error type for ztodo operations.
///
/// # Examples
///
/// ```
/// use ztodo::domain::{ItemId, TodoError};
///
/// let err = TodoError::NotFound(ItemId::new(42));
/// assert_eq!(err.to_string(), "item not found: 42");
/// ```
#[derive(Debug, Error)]
pub enum TodoError {
    /// Item text was empty after trimming.
    ///
    /// Raised at the add and edit boundaries; empty text is never stored.
    #[error("item text must not be empty")]
    EmptyText,

    /// An operation referenced an id that is not in the collection.
    #[error("item not found: {0}")]
    NotFound(ItemId),

    /// A route parameter could not be parsed as an item id.
    #[error("invalid item id: {0:?}")]
    InvalidId(String),

    /// The stored collection could not be read or decoded.
    #[error("failed to read stored items: {0}")]
    PersistenceRead(String),

    /// The collection could not be written to durable storage.
    #[error("failed to write stored items: {0}")]
    PersistenceWrite(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the storage worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoError {
    /// Returns `true` for failures the controller treats as silent no-ops.
    ///
    /// Empty text and unknown ids are expected outcomes of ordinary user input
    /// (and of a delete racing an edit on the same item), not faults.
    #[must_use]
    pub const fn is_benign(&self) -> bool {
        matches!(self, Self::EmptyText | Self::NotFound(_) | Self::InvalidId(_))
    }
}

/// A specialized `Result` type for ztodo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_lookup_errors_are_benign() {
        assert!(TodoError::EmptyText.is_benign());
        assert!(TodoError::NotFound(ItemId::new(1)).is_benign());
        assert!(TodoError::InvalidId("abc".into()).is_benign());
        assert!(!TodoError::PersistenceWrite("disk full".into()).is_benign());
    }
}
