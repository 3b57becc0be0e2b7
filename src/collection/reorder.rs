//! Reorder coordinator.
//!
//! Gestures name a source and a target item taken from the *visible*
//! subsequence, but the move is always expressed against the canonical order so
//! that items hidden by the current filter or search keep their relative
//! positions. With a filter active, the final position among hidden items follows
//! canonical indices, which may differ from what the user saw. That is accepted.

use crate::domain::{Item, ItemId};

/// Result of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The source item moved from one canonical index to another.
    Moved { from: usize, to: usize },
    /// No target (gesture cancelled or dropped outside any item).
    NoTarget,
    /// Source and target are the same item.
    SameItem,
    /// Source or target id is not in the collection.
    Missing,
}

impl ReorderOutcome {
    #[must_use]
    pub const fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Moves `source` to the canonical position currently held by `target`.
///
/// A single splice: the source is removed and reinserted at the target index.
/// Items strictly between the two indices shift by one slot; items outside that
/// range do not move.
pub fn move_onto(items: &mut Vec<Item>, source: ItemId, target: Option<ItemId>) -> ReorderOutcome {
    let Some(target) = target else {
        return ReorderOutcome::NoTarget;
    };
    if source == target {
        return ReorderOutcome::SameItem;
    }

    let from = items.iter().position(|item| item.id == source);
    let to = items.iter().position(|item| item.id == target);
    let (Some(from), Some(to)) = (from, to) else {
        return ReorderOutcome::Missing;
    };

    let moved = items.remove(from);
    items.insert(to, moved);

    tracing::debug!(%source, %target, from, to, "item reordered");
    ReorderOutcome::Moved { from, to }
}

/// Target for a one-step keyboard move within the visible subsequence.
///
/// Returns the neighbour of `source` in `visible` (`down` picks the next item,
/// otherwise the previous one), or `None` at either end, which the coordinator
/// treats as a cancelled gesture.
#[must_use]
pub fn neighbour_target(visible: &[ItemId], source: ItemId, down: bool) -> Option<ItemId> {
    let index = visible.iter().position(|id| *id == source)?;
    if down {
        visible.get(index + 1).copied()
    } else {
        index.checked_sub(1).and_then(|i| visible.get(i).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items(ids: &[i64]) -> Vec<Item> {
        ids.iter()
            .map(|&id| Item::new(ItemId::new(id), format!("item {id}")))
            .collect()
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn moves_source_onto_target_position() {
        let mut list = items(&[1, 2, 3]);
        let outcome = move_onto(&mut list, ItemId::new(2), Some(ItemId::new(1)));
        assert_eq!(outcome, ReorderOutcome::Moved { from: 1, to: 0 });
        assert_eq!(ids(&list), vec![2, 1, 3]);
    }

    #[test]
    fn forward_move_shifts_intervening_items_back() {
        let mut list = items(&[1, 2, 3, 4, 5]);
        move_onto(&mut list, ItemId::new(2), Some(ItemId::new(4)));
        assert_eq!(ids(&list), vec![1, 3, 4, 2, 5]);
    }

    #[test]
    fn untouched_items_keep_relative_order() {
        let mut list = items(&[1, 2, 3, 4, 5, 6, 7]);
        move_onto(&mut list, ItemId::new(6), Some(ItemId::new(2)));
        assert_eq!(ids(&list), vec![1, 6, 2, 3, 4, 5, 7]);

        let untouched: Vec<i64> = ids(&list).into_iter().filter(|id| *id != 6).collect();
        assert_eq!(untouched, vec![1, 2, 3, 4, 5, 7]);
    }

    #[test]
    fn cancelled_and_degenerate_gestures_do_nothing() {
        let mut list = items(&[1, 2, 3]);
        assert_eq!(move_onto(&mut list, ItemId::new(1), None), ReorderOutcome::NoTarget);
        assert_eq!(
            move_onto(&mut list, ItemId::new(2), Some(ItemId::new(2))),
            ReorderOutcome::SameItem
        );
        assert_eq!(
            move_onto(&mut list, ItemId::new(9), Some(ItemId::new(1))),
            ReorderOutcome::Missing
        );
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn filtered_move_resolves_against_canonical_order() {
        // Visible: [1, 3, 5] (evens hidden). Moving 5 onto 1 puts it at canonical index 0.
        let mut list = items(&[1, 2, 3, 4, 5]);
        move_onto(&mut list, ItemId::new(5), Some(ItemId::new(1)));
        assert_eq!(ids(&list), vec![5, 1, 2, 3, 4]);
    }

    #[test]
    fn neighbour_targets_stop_at_the_edges() {
        let visible = [ItemId::new(1), ItemId::new(3), ItemId::new(5)];
        assert_eq!(neighbour_target(&visible, ItemId::new(3), true), Some(ItemId::new(5)));
        assert_eq!(neighbour_target(&visible, ItemId::new(3), false), Some(ItemId::new(1)));
        assert_eq!(neighbour_target(&visible, ItemId::new(5), true), None);
        assert_eq!(neighbour_target(&visible, ItemId::new(1), false), None);
        assert_eq!(neighbour_target(&visible, ItemId::new(2), true), None);
    }
}
