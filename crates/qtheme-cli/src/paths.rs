//! Settings file lookup.

use std::path::{Path, PathBuf};

/// File name used in the working directory and the user config directory.
pub const SETTINGS_FILE: &str = "theme_settings.json";

/// Picks the settings file: `--config` (or `QTHEME_CONFIG`), then
/// `./theme_settings.json` if it exists, then
/// `<config dir>/qtheme/theme_settings.json`.
pub fn resolve_settings_path(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_in(explicit, &cwd, dirs::config_dir())
}

fn resolve_in(explicit: Option<&Path>, cwd: &Path, config_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = cwd.join(SETTINGS_FILE);
    if local.exists() {
        return local;
    }
    match config_dir {
        Some(dir) => dir.join("qtheme").join(SETTINGS_FILE),
        None => local,
    }
}
