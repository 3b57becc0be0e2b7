//! Domain layer for the ztodo plugin.
//!
//! Core domain types independent of Zellij APIs and storage concerns.
//!
//! # Organization
//!
//! - [`error`]: Error taxonomy and result alias
//! - [`item`]: Item and item id
//! - [`filter`]: Filter modes applied by the view projection
//!
//! # Examples
//!
//! ```
//! use ztodo::domain::{Item, ItemId, FilterMode};
//!
//! let item = Item::new(ItemId::new(1), "wash dishes");
//! assert!(FilterMode::Active.matches(&item));
//! assert!(!FilterMode::Favorites.matches(&item));
//! ```

pub mod error;
pub mod filter;
pub mod item;

pub use error::{Result, TodoError};
pub use filter::FilterMode;
pub use item::{normalize_text, Item, ItemId};
