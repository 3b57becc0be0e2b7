//! The item collection: canonical store, view projection and reordering.
//!
//! # Modules
//!
//! - [`store`]: [`ItemCollection`], the single owner of the canonical order
//! - [`view`]: pure projection of the visible subsequence
//! - [`reorder`]: translation of visible-list gestures into canonical moves
//!
//! # Example
//!
//! ```
//! use ztodo::collection::{project, ItemCollection};
//! use ztodo::domain::FilterMode;
//!
//! let mut items = ItemCollection::new();
//! let dishes = items.add("wash dishes", 1).unwrap();
//! let milk = items.add("buy milk", 2).unwrap();
//! items.toggle_complete(milk).unwrap();
//!
//! let active = project(items.items(), FilterMode::Active, "");
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].id, dishes);
//! ```

pub mod reorder;
pub mod store;
pub mod view;

pub use reorder::{neighbour_target, ReorderOutcome};
pub use store::{EditOutcome, ItemCollection};
pub use view::{match_range, project};
