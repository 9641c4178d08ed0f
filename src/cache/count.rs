//! Call Counting
//!
//! Wrapper that tallies every `store` call in a backend counter keyed by the
//! operation identity.

use tracing::debug;

use crate::backend::{Backend, SharedBackend};
use crate::cache::{decode_text, KeyValueCache, Value};
use crate::error::{CacheError, Result};

// == Count Calls ==
/// Counts `store` calls on the wrapped cache.
///
/// The counter is bumped before the inner call runs, so failed calls are
/// counted too.
#[derive(Debug, Clone)]
pub struct CountCalls<C> {
    inner: C,
    backend: SharedBackend,
    method: String,
}

impl<C: KeyValueCache> CountCalls<C> {
    /// Wraps `inner`, counting under the key `method`.
    pub fn new(inner: C, backend: SharedBackend, method: impl Into<String>) -> Self {
        Self {
            inner,
            backend,
            method: method.into(),
        }
    }

    /// Operation identity the counter is kept under.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Current value of the counter.
    pub fn calls(&self) -> Result<u64> {
        call_count(self.backend.as_ref(), &self.method)
    }
}

impl<C: KeyValueCache> KeyValueCache for CountCalls<C> {
    fn store(&self, value: Value) -> Result<String> {
        let count = self.backend.incr(&self.method)?;
        debug!(method = %self.method, count, "counted call");
        self.inner.store(value)
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.fetch(key)
    }
}

// == Counter Read ==
/// Reads the call counter for `method`; a missing counter reads as zero.
pub fn call_count(backend: &dyn Backend, method: &str) -> Result<u64> {
    match backend.get(method)? {
        Some(raw) => {
            let text = decode_text(raw)?;
            text.parse::<u64>().map_err(|_| {
                CacheError::Decode(format!("counter {} holds {:?}", method, text))
            })
        }
        None => Ok(0),
    }
}
