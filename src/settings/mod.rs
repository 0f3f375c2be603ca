//! User settings from `settings.conf` and the environment.
//!
//! Precedence, lowest first: built-in defaults, `settings.conf`,
//! `VOTEWISE_BACKEND_URL`, command-line flags (applied by the binary).

mod paths;

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

pub use paths::{SETTINGS_FILE, config_dir, logs_dir, resolve_settings_path};

use crate::i18n::Language;
use crate::util::config::{parse_key_value, skip_comment_or_empty};

/// API root used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001/api";

/// Environment variable overriding `api_base_url`.
pub const BACKEND_URL_ENV: &str = "VOTEWISE_BACKEND_URL";

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Resolved configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Root URL of the collection service.
    pub api_base_url: String,
    /// Preselected language; `None` means the user must choose.
    pub language: Option<Language>,
    /// Default tracing filter, e.g. `info` or `votewise=debug`.
    pub log_level: String,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            language: None,
            log_level: "info".to_string(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Connect timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// What: Apply the backend URL environment override.
    ///
    /// Inputs:
    /// - `lookup`: Environment accessor, `std::env::var` in production
    ///
    /// Details:
    /// - A blank value is ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BACKEND_URL_ENV).filter(|v| !v.trim().is_empty()) {
            debug!(%url, "Backend URL taken from {BACKEND_URL_ENV}");
            self.api_base_url = url.trim().to_string();
        }
    }
}

/// Settings together with what went wrong while reading them.
///
/// Settings are read before logging is initialised, so problems are collected
/// here and emitted by [`LoadedSettings::log`] once a subscriber exists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedSettings {
    /// Effective settings.
    pub settings: Settings,
    /// File that was read, if any.
    pub source: Option<PathBuf>,
    /// Ignored lines and values, in file order.
    pub warnings: Vec<String>,
}

impl LoadedSettings {
    /// Emit the source at `debug` and every collected problem at `warn`.
    pub fn log(&self) {
        if let Some(path) = &self.source {
            debug!(path = %path.display(), "Loaded settings");
        }
        for w in &self.warnings {
            warn!("{w}");
        }
    }
}

/// What: Parse `settings.conf` content over the defaults.
///
/// Inputs:
/// - `content`: File content
///
/// Output:
/// - Settings with every recognised, valid key applied, plus a warning for
///   each unknown key, malformed line or invalid value (which is skipped)
///
/// Details:
/// - Keys are case-insensitive; `-` and `.` are read as `_`.
#[must_use]
pub fn parse_settings(content: &str) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line_no = lineno + 1;
        if skip_comment_or_empty(line) {
            continue;
        }
        let Some((raw_key, val)) = parse_key_value(line) else {
            warnings.push(format!("line {line_no}: ignoring malformed settings line"));
            continue;
        };
        let key = raw_key.replace(['-', '.'], "_");
        match key.as_str() {
            "api_base_url" | "backend_url" => {
                if val.starts_with("http://") || val.starts_with("https://") {
                    settings.api_base_url = val;
                } else {
                    warnings.push(format!(
                        "line {line_no}: api_base_url '{val}' must be an http(s) URL; using default"
                    ));
                }
            }
            "language" | "lang" => match Language::from_key(&val) {
                Ok(l) => settings.language = Some(l),
                Err(e) => warnings.push(format!("line {line_no}: ignoring language setting: {e}")),
            },
            "log_level" => {
                if val.is_empty() {
                    warnings.push(format!("line {line_no}: empty log_level; using default"));
                } else {
                    settings.log_level = val;
                }
            }
            "connect_timeout_secs" | "connect_timeout" => match val.parse::<u64>() {
                Ok(v) if v > 0 => settings.connect_timeout_secs = v,
                _ => warnings.push(format!(
                    "line {line_no}: connect_timeout_secs '{val}' must be a positive integer"
                )),
            },
            other => warnings.push(format!("line {line_no}: unknown settings key '{other}'")),
        }
    }
    LoadedSettings {
        settings,
        source: None,
        warnings,
    }
}

/// What: Read settings from `path`, falling back to defaults when unreadable.
#[must_use]
pub fn load_settings_from(path: &Path) -> LoadedSettings {
    match std::fs::read_to_string(path) {
        Ok(content) => LoadedSettings {
            source: Some(path.to_path_buf()),
            ..parse_settings(&content)
        },
        Err(e) => LoadedSettings {
            warnings: vec![format!(
                "cannot read {}: {e}; using defaults",
                path.display()
            )],
            ..LoadedSettings::default()
        },
    }
}

/// What: Load settings from the standard location and the environment.
///
/// Output:
/// - Defaults overlaid with `settings.conf` (if found) and `VOTEWISE_BACKEND_URL`
#[must_use]
pub fn load_settings() -> LoadedSettings {
    let mut loaded = resolve_settings_path()
        .map_or_else(LoadedSettings::default, |p| load_settings_from(&p));
    loaded.settings.apply_env(|k| std::env::var(k).ok());
    loaded
}
