//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML color schemes, either built in (Catppuccin variants) or
//! loaded from a user file.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: dark (default)
//! - `catppuccin-latte`: light
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! completed_fg = "#a6e3a1"
//! favorite_fg = "#f9e2af"
//! removing_fg = "#f38ba8"
//! notification_fg = "#1e1e2e"
//! notification_bg = "#89b4fa"
//! failure_bg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use ztodo::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let styled = format!("{}done{}", Theme::fg(&theme.colors.completed_fg), Theme::reset());
//! assert!(styled.starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{Result, TodoError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, secondary info, inactive filter tabs.
    pub text_dim: String,

    pub border: String,
    /// Border of the search, compose and edit box.
    pub input_bar_border: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Check mark and text of completed items.
    pub completed_fg: String,
    /// Favorite star.
    pub favorite_fg: String,
    /// Rows waiting out a delete.
    pub removing_fg: String,

    pub notification_fg: String,
    pub notification_bg: String,
    /// Background of failure notifications.
    pub failure_bg: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// [`TodoError::Theme`] if the file cannot be read or is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TodoError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| TodoError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Resolves the configured theme: a file wins over a name, and anything
    /// that fails to load falls back to the default.
    #[must_use]
    pub fn resolve(name: Option<&str>, file: Option<&str>) -> Self {
        if let Some(file) = file {
            match Self::from_file(file) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %file, error = %e, "failed to load theme file, using default");
                }
            }
        }

        name.map_or_else(Self::default, |name| {
            Self::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Self::default()
            })
        })
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// 24-bit foreground color escape.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background color escape.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn strikethrough() -> &'static str {
        "\u{001b}[9m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-latte"] {
            let theme = Theme::from_name(name).expect("built-in theme");
            assert_eq!(theme.name, name);
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn hex_colors_become_escapes() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_overrides_name() {
        let latte = Theme::from_name("catppuccin-latte").expect("built-in theme");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        let custom = Theme {
            name: "custom".to_string(),
            ..latte
        };
        let body = toml::to_string(&custom).expect("serialize");
        file.write_all(body.as_bytes()).expect("write");

        let path = file.path().to_string_lossy().to_string();
        let theme = Theme::resolve(Some("catppuccin-mocha"), Some(&path));
        assert_eq!(theme, custom);
    }

    #[test]
    fn broken_theme_falls_back_to_default() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"name = ").expect("write");
        let path = file.path().to_string_lossy().to_string();

        assert!(matches!(Theme::from_file(&path), Err(TodoError::Theme(_))));
        assert_eq!(Theme::resolve(None, Some(&path)), Theme::default());
        assert_eq!(Theme::resolve(Some("unknown"), None), Theme::default());
    }
}
