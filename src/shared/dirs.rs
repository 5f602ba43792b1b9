//! Where repo-scenarios looks for its files.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "repo-scenarios";

/// Accepted config file names, in lookup order.
const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// `$XDG_CONFIG_HOME/repo-scenarios`, falling back to `~/.config/repo-scenarios`.
pub fn app_config_dir() -> Option<PathBuf> {
    xdg_config_home()
        .or_else(|| env_path("HOME").map(|home| home.join(".config")))
        .map(|base| base.join(APP_DIR_NAME))
}

/// Config files that may exist inside `dir`, in lookup order.
pub fn config_file_candidates(dir: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name))
}

// XDG only honours absolute paths; anything else counts as unset.
fn xdg_config_home() -> Option<PathBuf> {
    env_path("XDG_CONFIG_HOME").filter(|path| path.is_absolute())
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
