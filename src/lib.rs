//! ztodo: a to-do list plugin for Zellij.
//!
//! ztodo keeps an ordered list of items that can be added, completed,
//! favorited, edited inline, deleted, filtered, searched and reordered. The list
//! is persisted as JSON by a background worker and survives restarts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event handling, busy guard, deferred commands    │
//! │  - Notifications and timers                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Collection    │   │ Storage       │   │ Worker        │
//! │ (collection/) │   │ (storage/)    │   │ (worker/)     │
//! │ - Store       │   │ - Storage port│   │ - Load / save │
//! │ - Projection  │   │ - JSON file   │   │ - Lookup      │
//! │ - Reorder     │   │ - Repository  │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, UI and Infrastructure                      │
//! │  - Items, ids, filters, errors (domain/)            │
//! │  - Rendering and themes (ui/)                       │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/ztodo.wasm" {
//!         data_dir "~/.local/share/zellij/ztodo"
//!         theme "catppuccin-mocha"
//!         default_filter "active"
//!         simulate_latency "true"
//!         delete_delay_ms "300"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! 1. **Load**: `main.rs` parses [`Config`], builds the state with
//!    [`initialize`], and asks for permissions.
//! 2. **Start**: once permissions are granted, [`Event::Start`] posts
//!    `LoadItems` to the worker; every mutation is rejected until
//!    `ItemsLoaded` arrives.
//! 3. **Run**: keys become [`Event`]s; [`handle_event`] returns [`Action`]s
//!    (worker posts, wake-ups, close) which the shim executes.
//!
//! # Example
//!
//! ```rust
//! use ztodo::worker::WorkerResponse;
//! use ztodo::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     latency: ztodo::app::LatencyConfig::none(),
//!     ..Config::default()
//! };
//! let mut state = initialize(&config);
//!
//! let loaded = WorkerResponse::ItemsLoaded { items: vec![], recovered: false };
//! handle_event(&mut state, &Event::WorkerResponse(loaded), 0)?;
//! handle_event(&mut state, &Event::Add { text: "buy milk".into() }, 1)?;
//! assert_eq!(state.collection.len(), 1);
//! # Ok::<(), ztodo::TodoError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod collection;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LatencyConfig, ViewMode};
pub use domain::{FilterMode, Item, ItemId, Result, TodoError};
pub use ui::Theme;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Plugin configuration parsed from Zellij's configuration map.
///
/// Every key is optional. Unparsable values are logged and replaced by their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `todos.json` and the trace file.
    ///
    /// `~` expands to `/host`. Default: `/host/.local/share/zellij/ztodo`.
    pub data_dir: PathBuf,

    /// Built-in theme name. Ignored if `theme_file` loads.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for exported spans. Default: `"info"`.
    pub trace_level: Option<String>,

    /// Filter selected at startup. Default: all items.
    pub default_filter: FilterMode,

    /// Per-command simulated latency. `simulate_latency "false"` zeroes it.
    pub latency: LatencyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: infrastructure::get_data_dir(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
            default_filter: FilterMode::All,
            latency: LatencyConfig::default(),
        }
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(TodoError::Config(format!("{key}: expected a boolean, got {other:?}"))),
    }
}

fn parse_delay(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| TodoError::Config(format!("{key}: {e}")))
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use ztodo::{Config, FilterMode};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "~/notes".to_string());
    /// map.insert("default_filter".to_string(), "active".to_string());
    /// map.insert("delete_delay_ms".to_string(), "50".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_dir.to_str(), Some("/host/notes"));
    /// assert_eq!(config.default_filter, FilterMode::Active);
    /// assert_eq!(config.latency.delete_ms, 50);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let default_filter = config.get("default_filter").map_or(defaults.default_filter, |raw| {
            raw.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "invalid default_filter, showing all items");
                defaults.default_filter
            })
        });

        let simulate = config.get("simulate_latency").map_or(true, |raw| {
            parse_flag("simulate_latency", raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "invalid simulate_latency, keeping it on");
                true
            })
        });

        let mut latency = if simulate {
            LatencyConfig::default()
        } else {
            LatencyConfig::none()
        };
        if simulate {
            for (key, slot) in [
                ("add_delay_ms", &mut latency.add_ms),
                ("edit_delay_ms", &mut latency.edit_ms),
                ("delete_delay_ms", &mut latency.delete_ms),
                ("clear_delay_ms", &mut latency.clear_ms),
            ] {
                if let Some(raw) = config.get(key) {
                    match parse_delay(key, raw) {
                        Ok(ms) => *slot = ms,
                        Err(e) => tracing::warn!(error = %e, "invalid delay, using default"),
                    }
                }
            }
        }

        let non_empty = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            data_dir: infrastructure::resolve_data_dir(config.get("data_dir").map(String::as_str)),
            theme_name: non_empty("theme"),
            theme_file: non_empty("theme_file").map(|f| infrastructure::expand_tilde(&f)),
            trace_level: non_empty("trace_level"),
            default_filter,
            latency,
        }
    }
}

/// Builds the initial application state from configuration.
///
/// The state starts in its loading phase with an empty collection; the caller
/// sends [`Event::Start`] once the host is ready.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(data_dir = ?config.data_dir, "initializing ztodo plugin");

    let theme = Theme::resolve(config.theme_name.as_deref(), config.theme_file.as_deref());

    let mut state = AppState::new(theme, config.data_dir.clone());
    state.filter = config.default_filter;
    state.latency = config.latency;
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_gives_defaults() {
        assert_eq!(Config::from_zellij(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn latency_can_be_disabled() {
        let config = Config::from_zellij(&map(&[
            ("simulate_latency", "off"),
            ("add_delay_ms", "900"),
        ]));
        assert_eq!(config.latency, LatencyConfig::none());
    }

    #[test]
    fn bad_values_fall_back() {
        let config = Config::from_zellij(&map(&[
            ("simulate_latency", "maybe"),
            ("edit_delay_ms", "soon"),
            ("default_filter", "urgent"),
            ("theme", "  "),
        ]));
        assert_eq!(config.latency, LatencyConfig::default());
        assert_eq!(config.default_filter, FilterMode::All);
        assert_eq!(config.theme_name, None);
    }

    #[test]
    fn flags_report_config_errors() {
        assert!(matches!(parse_flag("k", "nah"), Err(TodoError::Config(_))));
        assert!(matches!(parse_delay("k", "-1"), Err(TodoError::Config(_))));
        assert_eq!(parse_flag("k", " YES ").ok(), Some(true));
    }

    #[test]
    fn initialize_applies_filter_and_latency() {
        let config = Config {
            default_filter: FilterMode::Favorites,
            latency: LatencyConfig::none(),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.filter, FilterMode::Favorites);
        assert_eq!(state.latency, LatencyConfig::none());
        assert!(state.busy.is_loading());
    }
}
