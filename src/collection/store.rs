//! Item collection store.
//!
//! [`ItemCollection`] owns the canonical ordered list of items and is the only
//! place that mutates it. Every operation addresses items by id against the full
//! collection, never by position in a filtered view.
//!
//! Invariants:
//! - ids are pairwise unique at all times;
//! - insertion order is display order until a reorder changes it;
//! - no stored item has empty text.

use super::reorder::{self, ReorderOutcome};
use crate::domain::{normalize_text, Item, ItemId, Result, TodoError};
use std::collections::HashSet;

/// Allocates time-derived ids that never repeat.
///
/// The next id is the current time in milliseconds, bumped to one past the last
/// issued id when the clock has not advanced (or went backwards).
#[derive(Debug, Clone, Default)]
struct IdAllocator {
    last: Option<i64>,
}

impl IdAllocator {
    fn seeded(items: &[Item]) -> Self {
        Self {
            last: items.iter().map(|item| item.id.get()).max(),
        }
    }

    fn next(&mut self, now_ms: i64) -> ItemId {
        let raw = match self.last {
            Some(last) if now_ms <= last => last.saturating_add(1),
            _ => now_ms,
        };
        self.last = Some(raw);
        ItemId::new(raw)
    }
}

/// Result of committing an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The item's text was replaced.
    Updated,
    /// The new text was empty, so the item was removed instead.
    Removed(Item),
}

/// The canonical, ordered, id-unique collection of items.
#[derive(Debug, Clone, Default)]
pub struct ItemCollection {
    items: Vec<Item>,
    ids: IdAllocator,
}

impl ItemCollection {
    /// Creates an empty collection.
    ///
    /// The first id handed out is the `now_ms` of the first [`add`](Self::add).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from loaded items, enforcing the store invariants.
    ///
    /// Stored data is not trusted:
    /// - later duplicates of an id are dropped (first occurrence wins);
    /// - items whose text is empty after trimming are dropped.
    ///
    /// Every dropped item is logged at `warn`. The id allocator is seeded past
    /// the largest surviving id, so new items never collide with loaded ones.
    ///
    /// # Arguments
    ///
    /// * `items` - Items in stored order, typically from the storage worker
    ///
    /// # Example
    ///
    /// ```
    /// use ztodo::collection::ItemCollection;
    /// use ztodo::domain::{Item, ItemId};
    ///
    /// let collection = ItemCollection::from_items(vec![
    ///     Item::new(ItemId::new(1), "buy milk"),
    ///     Item::new(ItemId::new(1), "buy milk again"),
    ///     Item::new(ItemId::new(2), "   "),
    /// ]);
    /// assert_eq!(collection.len(), 1);
    /// ```
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if normalize_text(&item.text).is_err() {
                tracing::warn!(id = %item.id, "dropping item with empty text");
            } else if seen.insert(item.id) {
                unique.push(item);
            } else {
                tracing::warn!(id = %item.id, "dropping item with duplicate id");
            }
        }

        Self {
            ids: IdAllocator::seeded(&unique),
            items: unique,
        }
    }

    /// All items in canonical order.
    ///
    /// This is the order that is persisted and the order every filtered view
    /// preserves. Only [`reorder`](Self::reorder) changes it for existing items.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    ///
    /// # Returns
    ///
    /// The item, or `None` if no item has that id. Callers use this to turn
    /// intents on unknown ids into no-ops before scheduling any work.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Canonical index of `id`, or `None` if it is not in the collection.
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Number of items not yet completed.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.completed).count()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.len() - self.active_count()
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut Item> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(TodoError::NotFound(id))
    }

    /// Appends a new active, non-favorite item and returns its id.
    ///
    /// # Errors
    ///
    /// [`TodoError::EmptyText`] if `text` is empty after trimming; the collection
    /// is left unchanged.
    pub fn add(&mut self, text: &str, now_ms: i64) -> Result<ItemId> {
        let text = normalize_text(text)?;
        let id = self.ids.next(now_ms);
        self.items.push(Item::new(id, text));
        tracing::debug!(%id, count = self.items.len(), "item added");
        Ok(id)
    }

    /// Flips `completed` and returns the new value.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id.
    pub fn toggle_complete(&mut self, id: ItemId) -> Result<bool> {
        let item = self.get_mut(id)?;
        item.completed = !item.completed;
        Ok(item.completed)
    }

    /// Flips `is_favorite` and returns the new value.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id.
    pub fn toggle_favorite(&mut self, id: ItemId) -> Result<bool> {
        let item = self.get_mut(id)?;
        item.is_favorite = !item.is_favorite;
        Ok(item.is_favorite)
    }

    /// Replaces the text of an item, or removes the item if `text` is blank.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id (for example because a
    /// delete already removed it).
    pub fn commit_edit(&mut self, id: ItemId, text: &str) -> Result<EditOutcome> {
        match normalize_text(text) {
            Ok(text) => {
                let text = text.to_string();
                self.get_mut(id)?.text = text;
                Ok(EditOutcome::Updated)
            }
            Err(_) => self.delete(id).map(EditOutcome::Removed),
        }
    }

    /// Removes an item and returns it.
    ///
    /// # Errors
    ///
    /// [`TodoError::NotFound`] if no item has this id.
    pub fn delete(&mut self, id: ItemId) -> Result<Item> {
        let index = self.position(id).ok_or(TodoError::NotFound(id))?;
        let removed = self.items.remove(index);
        tracing::debug!(%id, count = self.items.len(), "item deleted");
        Ok(removed)
    }

    /// Removes every completed item and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.completed);
        before - self.items.len()
    }

    /// Moves `source` onto the canonical position of `target`.
    pub fn reorder(&mut self, source: ItemId, target: Option<ItemId>) -> ReorderOutcome {
        reorder::move_onto(&mut self.items, source, target)
    }
}
