// Key-value stores and the cache entry envelope.
// Handles JSON serialization, TTL checking, and the session-scoped store.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Result, SiteError};

/// String key-value storage with per-key overwrite semantics.
///
/// Implementations must be safe to share between concurrent lookups;
/// writes to different keys never interfere and a write to an existing
/// key replaces the prior value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Wrapper for cached data with the time it was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// When the data was cached, in epoch milliseconds.
    pub timestamp: i64,
    /// The cached data.
    pub data: T,
}

impl<T> CachedData<T> {
    pub fn new(data: T, timestamp: i64) -> Self {
        Self { timestamp, data }
    }

    /// Milliseconds elapsed between caching and `now`.
    pub fn age_millis(&self, now: i64) -> i64 {
        now.saturating_sub(self.timestamp)
    }

    /// Check if the entry is younger than `ttl` at time `now`.
    pub fn is_fresh(&self, now: i64, ttl: Duration) -> bool {
        let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        self.age_millis(now) < ttl
    }
}

/// Read and decode a cache envelope stored under `key`.
pub fn read_cached<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<CachedData<T>>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `data` with its timestamp and store it under `key`.
pub fn write_cached<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    data: &T,
    timestamp: i64,
) -> Result<()> {
    let json = serde_json::to_string(&CachedData::new(data, timestamp))?;
    store.set(key, json)
}

/// Session-scoped store living as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| SiteError::Other(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| SiteError::Other(e.to_string()))?;
        entries.insert(key.to_string(), value);
        Ok(())
    }
}
