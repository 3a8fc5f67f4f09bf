//! Opaque key-value persistence for conversations and preferences.
//!
//! The store only moves strings in and out; callers decide how to encode
//! them. [`load_json_or`] implements the parse-with-fallback read used at
//! startup: a missing or corrupt value silently yields the default.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

pub const CONVERSATIONS_KEY: &str = "conversations";
pub const ACTIVE_CONVERSATION_KEY: &str = "activeConversation";
pub const THEME_KEY: &str = "theme";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as the file `<dir>/<key>`, replacing it atomically.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let sanitized: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(sanitized)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => {
                debug!(path = %path.display(), error = %err, "failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.as_file_mut().sync_all()?;
        temp_file
            .persist(self.path_for(key))
            .map_err(|err| err.error)?;
        Ok(())
    }
}

/// Process-local store used for tests and `--ephemeral` sessions.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|values| values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| io::Error::other("memory store poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads `key` as JSON, falling back to `default()` when absent or unparseable.
pub fn load_json_or<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(raw) = store.get(key) else {
        return default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            debug!(key, error = %err, "discarding unparseable stored value");
            default()
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> io::Result<()> {
    let encoded = serde_json::to_string(value).map_err(io::Error::other)?;
    store.set(key, &encoded)
}
