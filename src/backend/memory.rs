//! In-Memory Backend
//!
//! HashMap-backed store with string and list values, guarded by a single lock
//! so each operation is atomic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::backend::entry::resolve_range;
use crate::backend::{Backend, Entry, SharedBackend, DEFAULT_MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Memory Backend ==
/// In-process key-value store.
#[derive(Debug)]
pub struct MemoryBackend {
    /// Key-value storage
    entries: Mutex<HashMap<String, Entry>>,
    /// Largest single value accepted by `set`
    max_value_size: usize,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates an empty backend that rejects values over `max_value_size` bytes.
    pub fn new(max_value_size: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_value_size,
        }
    }

    /// Creates an empty backend wrapped in a shared handle.
    pub fn shared(max_value_size: usize) -> SharedBackend {
        Arc::new(Self::new(max_value_size))
    }

    // == Length ==
    /// Returns the number of keys currently held.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|e| CacheError::Backend(format!("Failed to acquire store lock: {}", e)))
    }

    fn check_size(&self, value: &[u8]) -> Result<()> {
        if value.len() > self.max_value_size {
            return Err(CacheError::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                self.max_value_size
            )));
        }
        Ok(())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VALUE_SIZE)
    }
}

fn wrong_type(key: &str, found: &Entry) -> CacheError {
    CacheError::WrongType(format!("{} holds a {}", key, found.kind()))
}

impl Backend for MemoryBackend {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_size(value)?;

        let mut entries = self.lock()?;
        entries.insert(key.to_string(), Entry::Bytes(value.to_vec()));
        debug!(key, size = value.len(), "set");
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.lock()?;
        match entries.get(key) {
            Some(Entry::Bytes(bytes)) => Ok(Some(bytes.clone())),
            Some(other) => Err(wrong_type(key, other)),
            None => Ok(None),
        }
    }

    fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    fn incr(&self, key: &str) -> Result<i64> {
        let mut entries = self.lock()?;

        let current = match entries.get(key) {
            Some(Entry::Bytes(bytes)) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| {
                    CacheError::InvalidRequest(format!("{} does not hold an integer", key))
                })?,
            Some(other) => return Err(wrong_type(key, other)),
            None => 0,
        };

        let next = current
            .checked_add(1)
            .ok_or_else(|| CacheError::InvalidRequest(format!("{} would overflow", key)))?;
        entries.insert(key.to_string(), Entry::Bytes(next.to_string().into_bytes()));
        Ok(next)
    }

    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize> {
        let mut entries = self.lock()?;
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::List(Vec::new()));

        match entry {
            Entry::List(items) => {
                items.push(value.to_vec());
                Ok(items.len())
            }
            other => Err(wrong_type(key, other)),
        }
    }

    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let entries = self.lock()?;
        match entries.get(key) {
            Some(Entry::List(items)) => Ok(resolve_range(items.len(), start, stop)
                .map(|(from, to)| items[from..=to].to_vec())
                .unwrap_or_default()),
            Some(other) => Err(wrong_type(key, other)),
            None => Ok(Vec::new()),
        }
    }

    fn flush(&self) -> Result<()> {
        let mut entries = self.lock()?;
        let removed = entries.len();
        let bytes: usize = entries.values().map(Entry::size).sum();
        entries.clear();
        debug!(removed, bytes, "flushed store");
        Ok(())
    }
}
