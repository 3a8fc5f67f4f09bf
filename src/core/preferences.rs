use tracing::warn;

use crate::core::persistence::{KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }

    /// Stored preference, else the terminal's own background (`COLORFGBG`),
    /// else dark.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Self::parse)
            .or_else(|| {
                std::env::var("COLORFGBG")
                    .ok()
                    .as_deref()
                    .and_then(Self::from_colorfgbg)
            })
            .unwrap_or(ThemeMode::Dark)
    }

    pub fn save(self, store: &dyn KeyValueStore) {
        if let Err(err) = store.set(THEME_KEY, self.as_str()) {
            warn!(error = %err, "failed to persist theme preference");
        }
    }

    /// Interprets `COLORFGBG` ("fg;bg" or "fg;default;bg"); backgrounds 7 and
    /// 15 are the light ANSI greys/whites.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        Some(match background {
            7 | 15 => ThemeMode::Light,
            _ => ThemeMode::Dark,
        })
    }
}
