//! View projection.
//!
//! Derives the visible subsequence from the canonical collection, the filter mode
//! and the search text. Projections borrow from the collection and are recomputed
//! on every read; nothing here is cached across mutations.

use crate::domain::{FilterMode, Item};

/// Returns the items passing both the filter and the search, in canonical order.
///
/// # Examples
///
/// ```
/// use ztodo::collection::project;
/// use ztodo::domain::{FilterMode, Item, ItemId};
///
/// let mut milk = Item::new(ItemId::new(2), "buy milk");
/// milk.completed = true;
/// let items = vec![Item::new(ItemId::new(1), "wash dishes"), milk];
///
/// let visible = project(&items, FilterMode::All, "MILK");
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].id, ItemId::new(2));
/// ```
#[must_use]
pub fn project<'a>(items: &'a [Item], filter: FilterMode, search: &str) -> Vec<&'a Item> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| filter.matches(item) && contains_lowercase(&item.text, &needle))
        .collect()
}

/// Case-insensitive substring test against an already lowercased needle. An
/// empty needle matches everything.
fn contains_lowercase(text: &str, needle: &str) -> bool {
    needle.is_empty() || text.to_lowercase().contains(needle)
}

/// Character range `(start, end)` of the first case-insensitive match of `query`.
///
/// Used by the renderer for highlighting. Returns `None` when there is no match,
/// when the query is empty, or when lowercasing changes the character count of
/// `text` (so indices could not be mapped back reliably).
#[must_use]
pub fn match_range(text: &str, query: &str) -> Option<(usize, usize)> {
    if query.is_empty() {
        return None;
    }
    let lowered = text.to_lowercase();
    if lowered.chars().count() != text.chars().count() {
        return None;
    }
    let needle = query.to_lowercase();
    let byte_start = lowered.find(&needle)?;
    let start = lowered[..byte_start].chars().count();
    Some((start, start + needle.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemId;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Item> {
        let mut milk = Item::new(ItemId::new(2), "buy milk");
        milk.completed = true;
        let mut call = Item::new(ItemId::new(3), "Call mom");
        call.is_favorite = true;
        vec![Item::new(ItemId::new(1), "wash dishes"), milk, call]
    }

    fn ids(items: &[&Item]) -> Vec<i64> {
        items.iter().map(|item| item.id.get()).collect()
    }

    #[test]
    fn all_with_empty_search_is_identity() {
        let items = sample();
        assert_eq!(ids(&project(&items, FilterMode::All, "")), vec![1, 2, 3]);
    }

    #[test]
    fn filters_compose_with_search() {
        let items = sample();
        assert_eq!(ids(&project(&items, FilterMode::Completed, "")), vec![2]);
        assert_eq!(ids(&project(&items, FilterMode::Active, "")), vec![1, 3]);
        assert_eq!(ids(&project(&items, FilterMode::Favorites, "")), vec![3]);
        assert_eq!(ids(&project(&items, FilterMode::Active, "mom")), vec![3]);
        assert!(project(&items, FilterMode::Completed, "mom").is_empty());
    }

    #[test]
    fn search_ignores_completion_and_case() {
        let items = sample();
        assert_eq!(ids(&project(&items, FilterMode::All, "milk")), vec![2]);
        assert_eq!(ids(&project(&items, FilterMode::All, "CALL")), vec![3]);
    }

    #[test]
    fn projection_never_exceeds_collection() {
        let items = sample();
        for filter in FilterMode::ALL {
            for search in ["", "a", "zzz", "M"] {
                assert!(project(&items, filter, search).len() <= items.len());
            }
        }
    }

    #[test]
    fn match_ranges_use_char_indices() {
        assert_eq!(match_range("Buy MILK", "milk"), Some((4, 8)));
        assert_eq!(match_range("café au lait", "au"), Some((5, 7)));
        assert_eq!(match_range("buy milk", ""), None);
        assert_eq!(match_range("buy milk", "bread"), None);
    }
}
