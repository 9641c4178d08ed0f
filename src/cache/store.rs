//! Cache Store Module
//!
//! Base facade writing values under random UUID keys in the shared backend.

use tracing::debug;
use uuid::Uuid;

use crate::backend::SharedBackend;
use crate::cache::{CallHistory, CountCalls, KeyValueCache, Value, STORE_METHOD};
use crate::error::Result;

/// The standard instrumented stack: counting outermost, then history.
pub type Instrumented = CountCalls<CallHistory<Cache>>;

// == Cache ==
/// Uninstrumented store facade over a shared backend.
#[derive(Debug, Clone)]
pub struct Cache {
    /// Shared store handle
    backend: SharedBackend,
}

impl Cache {
    // == Constructors ==
    /// Creates a facade over `backend` without touching its contents.
    pub fn new(backend: SharedBackend) -> Self {
        Self { backend }
    }

    /// Flushes `backend`, then creates a facade over it.
    pub fn flushed(backend: SharedBackend) -> Result<Self> {
        backend.flush()?;
        Ok(Self::new(backend))
    }

    /// Builds the counted and recorded stack under the `Cache.store` identity.
    pub fn instrumented(backend: SharedBackend) -> Instrumented {
        Self::instrumented_as(backend, STORE_METHOD)
    }

    /// Builds the counted and recorded stack under a custom identity.
    pub fn instrumented_as(backend: SharedBackend, method: impl Into<String>) -> Instrumented {
        let method = method.into();
        let base = Self::new(backend.clone());
        let history = CallHistory::new(base, backend.clone(), method.clone());
        CountCalls::new(history, backend, method)
    }
}

impl KeyValueCache for Cache {
    fn store(&self, value: Value) -> Result<String> {
        let key = Uuid::new_v4().to_string();
        self.backend.set(&key, &value.to_bytes())?;
        debug!(key = %key, kind = value.kind(), "stored value");
        Ok(key)
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.backend.get(key)
    }
}
