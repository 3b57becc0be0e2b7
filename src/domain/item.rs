//! Item domain model.
//!
//! An [`Item`] is one entry of the to-do list. Its position is not stored on the
//! item: order is defined solely by the item's index in the canonical collection
//! owned by [`ItemCollection`](crate::collection::ItemCollection).

use crate::domain::error::TodoError;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier of an item.
///
/// Ids are allocated from the current time in milliseconds (bumped past the last
/// issued id when the clock has not advanced), so an id is also the item's
/// creation timestamp. They are compared by equality only; collection order never
/// depends on id order.
///
/// Serialized as a bare JSON number. Route parameters carry the decimal string
/// form, parsed with [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wraps a raw id. The collection allocates ids; this is for decoding
    /// and tests.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw millisecond value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Creation time encoded in the id, if it is a plausible timestamp.
    #[must_use]
    pub fn created_at(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses the decimal route form, ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`TodoError::InvalidId`] carrying the raw input when it is not an
/// integer.
impl FromStr for ItemId {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TodoError::InvalidId(s.to_string()))
    }
}

/// One list entry.
///
/// `text` is never empty: the add and edit boundaries reject (or turn into a
/// delete) any text that is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    /// Trimmed, non-empty text.
    pub text: String,
    pub completed: bool,

    /// Stored as `isFavorite` on disk.
    pub is_favorite: bool,
}

impl Item {
    /// Creates an active, non-favorite item.
    #[must_use]
    pub fn new(id: ItemId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            is_favorite: false,
        }
    }
}

/// Trims `text` and rejects it if nothing remains.
///
/// # Errors
///
/// Returns [`TodoError::EmptyText`] for empty or whitespace-only input.
///
/// # Example
///
/// ```
/// use ztodo::domain::normalize_text;
///
/// assert_eq!(normalize_text("  buy milk \n").ok(), Some("buy milk"));
/// assert!(normalize_text(" \t ").is_err());
/// ```
pub fn normalize_text(text: &str) -> Result<&str, TodoError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(TodoError::EmptyText)
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parses_from_route_parameter() {
        let id: ItemId = "1718000000000".parse().expect("valid id");
        assert_eq!(id, ItemId::new(1_718_000_000_000));
        assert_eq!(id.to_string(), "1718000000000");
    }

    #[test]
    fn id_rejects_garbage() {
        let err = "todo-7".parse::<ItemId>().unwrap_err();
        assert!(matches!(err, TodoError::InvalidId(raw) if raw == "todo-7"));
    }

    #[test]
    fn id_doubles_as_creation_time() {
        let created = ItemId::new(0).created_at().expect("epoch");
        assert_eq!(created.timestamp(), 0);
    }

    #[test]
    fn normalize_rejects_blank_text() {
        assert!(normalize_text("").is_err());
        assert!(normalize_text("  \t ").is_err());
        assert_eq!(normalize_text("  buy milk ").ok(), Some("buy milk"));
    }
}
