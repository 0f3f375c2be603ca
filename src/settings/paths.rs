use std::env;
use std::path::{Path, PathBuf};

/// Name of the directory under the config base.
const APP_DIR: &str = "votewise";

/// Settings file name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.conf";

/// What: Candidate config directories in priority order.
///
/// Inputs:
/// - `xdg_config`: Value of `XDG_CONFIG_HOME`, if set
/// - `home`: Value of `HOME`, if set
///
/// Output:
/// - `$XDG_CONFIG_HOME/votewise` then `$HOME/.config/votewise`, skipping unset or blank inputs
pub(crate) fn candidate_dirs(xdg_config: Option<&str>, home: Option<&str>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(xdg) = xdg_config.filter(|s| !s.trim().is_empty()) {
        dirs.push(Path::new(xdg).join(APP_DIR));
    }
    if let Some(h) = home.filter(|s| !s.trim().is_empty()) {
        dirs.push(Path::new(h).join(".config").join(APP_DIR));
    }
    dirs
}

fn env_dirs() -> Vec<PathBuf> {
    let xdg = env::var("XDG_CONFIG_HOME").ok();
    let home = env::var("HOME").ok();
    candidate_dirs(xdg.as_deref(), home.as_deref())
}

/// Determine the `settings.conf` path, if one exists.
pub fn resolve_settings_path() -> Option<PathBuf> {
    env_dirs()
        .into_iter()
        .map(|d| d.join(SETTINGS_FILE))
        .find(|p| p.is_file())
}

/// Config directory for VoteWise (not created).
pub fn config_dir() -> Option<PathBuf> {
    env_dirs().into_iter().next()
}

/// Logs directory under the config directory, created on demand.
///
/// `None` when no base directory is known or it cannot be created.
pub fn logs_dir() -> Option<PathBuf> {
    let dir = config_dir()?.join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
