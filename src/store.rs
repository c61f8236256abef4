//! Persistent integer key-value storage
//!
//! Scores persist behind a small trait with explicit initialization and
//! flush-on-write semantics; no process-wide singleton. Native builds use a
//! JSON file, browser builds use LocalStorage, tests use the in-memory map.

use std::collections::HashMap;

/// External persistent store collaborator
///
/// A read of an absent key substitutes the given default; it is never an
/// error.
pub trait ScoreStore {
    fn load_int(&self, key: &str, default: i64) -> i64;
    fn store_int(&mut self, key: &str, value: i64);
}

/// Volatile in-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl ScoreStore for MemoryStore {
    fn load_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn store_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

/// JSON-file-backed store (native)
///
/// The whole map is rewritten on every store; a corrupt or missing file
/// degrades to an empty map with a logged warning.
#[cfg(not(target_arch = "wasm32"))]
pub struct JsonFileStore {
    path: std::path::PathBuf,
    values: HashMap<String, i64>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(values) => values,
                Err(err) => {
                    log::warn!("corrupt score file {}: {err}", path.display());
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };
        Self { path, values }
    }

    fn flush(&self) {
        match serde_json::to_string_pretty(&self.values) {
            Ok(json) => {
                if let Err(err) = std::fs::write(&self.path, json) {
                    log::warn!("failed to write {}: {err}", self.path.display());
                }
            }
            Err(err) => log::warn!("failed to serialize scores: {err}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStore for JsonFileStore {
    fn load_int(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn store_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
        self.flush();
    }
}

/// LocalStorage-backed store (browser)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_int(&self, key: &str, default: i64) -> i64 {
        Self::storage()
            .and_then(|s| s.get_item(key).ok().flatten())
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    fn store_int(&mut self, key: &str, value: i64) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, &value.to_string());
        }
    }
}
