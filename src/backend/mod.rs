//! Backend Module
//!
//! The key-value store the cache delegates to. The store is a collaborator,
//! not part of the cache: anything that offers these operations atomically
//! can back the facade.

mod entry;
mod memory;

pub use entry::Entry;
pub use memory::MemoryBackend;

use std::sync::Arc;

use crate::error::Result;

// == Public Constants ==
/// Default maximum value size accepted by [`MemoryBackend`] in bytes
pub const DEFAULT_MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Backend Trait ==
/// Operations the cache needs from a key-value store.
///
/// Each call is atomic on its own; no ordering is promised across calls.
pub trait Backend: Send + Sync + std::fmt::Debug {
    /// Stores `value` under `key`, replacing whatever was there.
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Returns the value under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Returns true if `key` holds any value.
    fn exists(&self, key: &str) -> Result<bool>;

    /// Increments the integer under `key` by one and returns the new value.
    ///
    /// A missing key starts from zero.
    fn incr(&self, key: &str) -> Result<i64>;

    /// Appends `value` to the list under `key` and returns the new length.
    fn rpush(&self, key: &str, value: &[u8]) -> Result<usize>;

    /// Reads the inclusive range `start..=stop` of the list under `key`.
    ///
    /// Negative indices count from the end. A missing key reads as empty.
    fn lrange(&self, key: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key.
    fn flush(&self) -> Result<()>;
}

/// Shared handle to a backend, passed to every component that needs the store.
pub type SharedBackend = Arc<dyn Backend>;
