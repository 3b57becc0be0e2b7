//! Terminal rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → components → ANSI frame
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready view model types
//! - [`renderer`]: frame composition and output
//! - [`components`]: per-region renderers
//! - [`helpers`]: cursor positioning, centering and match highlighting
//! - [`theme`]: color schemes and ANSI escapes
//!
//! # Example
//!
//! ```rust
//! use ztodo::app::AppState;
//! use ztodo::ui::{render_frame, Theme};
//!
//! let state = AppState::new(Theme::default(), "/tmp/ztodo".into());
//! let frame = render_frame(&state, 24, 80);
//! assert!(frame.contains("Loading items..."));
//! ```

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_frame};
pub use theme::Theme;
pub use viewmodel::{
    DetailBody, DetailViewModel, DisplayItem, EmptyState, FilterTab, FooterInfo, HeaderInfo,
    InputBarInfo, NotificationInfo, UIViewModel,
};
