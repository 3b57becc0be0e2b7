//! Path handling for the Zellij sandbox, where `~` on the host maps to `/host`.

use std::path::PathBuf;

/// Returns the default data directory for item storage.
///
/// Resolves to `~/.local/share/zellij/ztodo` on the host when Zellij was started
/// from the home directory. The items file `todos.json` lives inside it.
///
/// # Examples
///
/// ```
/// use ztodo::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/ztodo"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("ztodo")
}

/// Expands tilde paths to use the `/host` prefix.
///
/// # Examples
///
/// ```
/// use ztodo::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/todos"), "/host/todos");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Resolves a configured data directory, falling back to [`get_data_dir`] when
/// unset or blank.
#[must_use]
pub fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    configured
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map_or_else(get_data_dir, |dir| PathBuf::from(expand_tilde(dir)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tilde_only_expands_at_the_start() {
        assert_eq!(expand_tilde("~/a/~b"), "/host/a/~b");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn blank_configuration_uses_default_dir() {
        assert_eq!(resolve_data_dir(None), get_data_dir());
        assert_eq!(resolve_data_dir(Some("  ")), get_data_dir());
        assert_eq!(
            resolve_data_dir(Some("~/notes")),
            PathBuf::from("/host/notes")
        );
    }
}
