use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::reveal::RevealMode;

/// On-disk configuration (`config.toml`). Every field is optional; unset
/// fields fall back to the built-in defaults when resolved into [`Settings`].
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Agent endpoint receiving `POST {contents, thread_id}`
    pub endpoint: Option<String>,
    /// How replies are revealed: "staged" (word by word) or "instant"
    pub reveal: Option<RevealMode>,
    /// Delay between revealed words, in milliseconds
    pub reveal_interval_ms: Option<u64>,
    /// Whole-request timeout in seconds; unset leaves the HTTP client default
    pub request_timeout_secs: Option<u64>,
    /// Directory holding persisted conversations and preferences
    pub data_dir: Option<PathBuf>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub endpoint: Option<String>,
    pub instant_reveal: bool,
    pub data_dir: Option<PathBuf>,
}

/// Effective runtime settings after applying overrides, config and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub reveal_mode: RevealMode,
    pub reveal_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub data_dir: Option<PathBuf>,
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
