//! Key-value text storage used underneath the task store.
//!
//! The store never talks to a concrete persistence mechanism; it is handed a
//! [`KeyValueStore`] at construction. [`MemoryStorage`] backs tests and
//! throwaway sessions, [`SqliteStorage`](crate::db::kv::SqliteStorage) backs
//! the command-line application.

use super::error::{StoreError, StoreResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Keys of the storage namespace. Only [`StorageKey::Tasks`] is read or
/// written by the task store; the rest are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    Tasks,
    Pomodoro,
    Settings,
    Stats,
}

impl StorageKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Tasks => "duck-done-tasks",
            StorageKey::Pomodoro => "duck-done-pomodoro",
            StorageKey::Settings => "duck-done-settings",
            StorageKey::Stats => "duck-done-stats",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synchronous text-to-text storage.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Overwrites any previous value.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-process storage. Clones share the same entries, so two handles behave
/// like two browser tabs over one local store: whoever writes last wins.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that refuses writes once the combined size of keys and values
    /// would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage {
            entries: Arc::default(),
            quota: Some(quota),
        }
    }

    fn used_without(entries: &HashMap<String, String>, key: &str) -> usize {
        entries.iter().filter(|(k, _)| k.as_str() != key).map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.lock();
        if let Some(quota) = self.quota {
            let needed = Self::used_without(&entries, key) + key.len() + value.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded { needed, quota });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
