//! XDG Base Directory utilities.

use std::path::PathBuf;

/// Application directory name under the XDG roots
pub const APP_DIR: &str = "driftcheck";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
pub fn data_home() -> Option<PathBuf> {
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return Some(PathBuf::from(xdg_data_home));
    }

    non_empty_env("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Option<PathBuf> {
    if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home));
    }

    non_empty_env("HOME").map(|home| PathBuf::from(home).join(".config"))
}

/// `$XDG_DATA_HOME/driftcheck/`, where snapshots land by default
pub fn app_data_dir() -> Option<PathBuf> {
    data_home().map(|dir| dir.join(APP_DIR))
}

/// `$XDG_CONFIG_HOME/driftcheck/config.toml`
pub fn global_config_path() -> Option<PathBuf> {
    config_home().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
