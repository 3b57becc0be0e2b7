//! Filter modes for the visible item list.
//!
//! The filter is the first stage of the view projection; the search query is
//! applied to whatever passes it. Modes are reachable three ways:
//!
//! - `Tab` cycles through [`FilterMode::ALL`] in display order
//! - digits `1`-`4` jump to a mode ([`FilterMode::from_shortcut`])
//! - the `default_filter` config key picks the starting mode ([`FromStr`])

use crate::domain::item::Item;
use std::str::FromStr;

/// Which items pass the filter stage of the view projection.
///
/// Transient UI state: never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every item passes.
    #[default]
    All,
    /// Items that are not completed.
    Active,
    /// Completed items.
    Completed,
    /// Items marked as favorite.
    Favorites,
}

impl FilterMode {
    /// All modes in display order.
    pub const ALL: [Self; 4] = [Self::All, Self::Active, Self::Completed, Self::Favorites];

    /// Whether `item` passes this filter.
    ///
    /// # Example
    ///
    /// ```
    /// use ztodo::{FilterMode, Item, ItemId};
    ///
    /// let mut item = Item::new(ItemId::new(1), "buy milk");
    /// assert!(FilterMode::Active.matches(&item));
    ///
    /// item.completed = true;
    /// assert!(!FilterMode::Active.matches(&item));
    /// assert!(FilterMode::Completed.matches(&item));
    /// ```
    #[must_use]
    pub const fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
            Self::Favorites => item.is_favorite,
        }
    }

    /// Tab caption in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Favorites => "Favorites",
        }
    }

    /// The next mode in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Completed,
            Self::Completed => Self::Favorites,
            Self::Favorites => Self::All,
        }
    }

    /// Mode for a 1-based shortcut digit.
    #[must_use]
    pub fn from_shortcut(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(usize::try_from(index).ok()?).copied()
    }

    /// Copy for the empty list under this mode.
    #[must_use]
    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::All => "No items yet",
            Self::Active => "No active items",
            Self::Completed => "No completed items",
            Self::Favorites => "No favorite items",
        }
    }
}

/// Case-insensitive; accepts the British spelling "favourites".
impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "favorites" | "favourites" => Ok(Self::Favorites),
            other => Err(format!("unknown filter mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::ItemId;

    fn item(completed: bool, is_favorite: bool) -> Item {
        Item {
            id: ItemId::new(1),
            text: "x".into(),
            completed,
            is_favorite,
        }
    }

    #[test]
    fn predicates() {
        let done_fav = item(true, true);
        let open = item(false, false);

        assert!(FilterMode::All.matches(&done_fav));
        assert!(FilterMode::All.matches(&open));
        assert!(FilterMode::Active.matches(&open));
        assert!(!FilterMode::Active.matches(&done_fav));
        assert!(FilterMode::Completed.matches(&done_fav));
        assert!(FilterMode::Favorites.matches(&done_fav));
        assert!(!FilterMode::Favorites.matches(&open));
    }

    #[test]
    fn cycling_visits_every_mode() {
        let mut mode = FilterMode::All;
        for expected in [FilterMode::Active, FilterMode::Completed, FilterMode::Favorites, FilterMode::All] {
            mode = mode.next();
            assert_eq!(mode, expected);
        }
    }

    #[test]
    fn shortcuts_and_parsing() {
        assert_eq!(FilterMode::from_shortcut('1'), Some(FilterMode::All));
        assert_eq!(FilterMode::from_shortcut('4'), Some(FilterMode::Favorites));
        assert_eq!(FilterMode::from_shortcut('0'), None);
        assert_eq!(FilterMode::from_shortcut('9'), None);
        assert_eq!("Completed".parse::<FilterMode>(), Ok(FilterMode::Completed));
        assert!("starred".parse::<FilterMode>().is_err());
    }
}
