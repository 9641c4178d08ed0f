//! Call History
//!
//! Wrapper that appends each `store` call's rendered arguments and outcome to
//! two backend lists, `<method>:inputs` and `<method>:outputs`.

use std::slice;

use tracing::{debug, warn};

use crate::backend::SharedBackend;
use crate::cache::{render_args, KeyValueCache, Value};
use crate::error::Result;

/// Prefix of the output recorded for a call that returned an error
pub const FAILURE_MARKER: &str = "error: ";

/// List key holding rendered inputs for `method`.
pub fn inputs_key(method: &str) -> String {
    format!("{}:inputs", method)
}

/// List key holding rendered outputs for `method`.
pub fn outputs_key(method: &str) -> String {
    format!("{}:outputs", method)
}

// == Call History ==
/// Records inputs and outputs of `store` calls on the wrapped cache.
///
/// An output is appended for every recorded input: the returned key on
/// success, `error: <message>` on failure. Entry `i` of both lists describes
/// the same call.
#[derive(Debug, Clone)]
pub struct CallHistory<C> {
    inner: C,
    backend: SharedBackend,
    method: String,
}

impl<C: KeyValueCache> CallHistory<C> {
    /// Wraps `inner`, recording under the lists of `method`.
    pub fn new(inner: C, backend: SharedBackend, method: impl Into<String>) -> Self {
        Self {
            inner,
            backend,
            method: method.into(),
        }
    }

    /// The wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: KeyValueCache> KeyValueCache for CallHistory<C> {
    fn store(&self, value: Value) -> Result<String> {
        let input = render_args(slice::from_ref(&value));
        self.backend
            .rpush(&inputs_key(&self.method), input.as_bytes())?;

        let result = self.inner.store(value);

        let output = match &result {
            Ok(key) => key.clone(),
            Err(err) => {
                warn!(method = %self.method, error = %err, "recording failed call");
                format!("{}{}", FAILURE_MARKER, err)
            }
        };
        // The inner outcome wins over a failed log write: a stored key or a
        // store error must still reach the caller.
        match self
            .backend
            .rpush(&outputs_key(&self.method), output.as_bytes())
        {
            Ok(recorded) => {
                debug!(method = %self.method, input = %input, recorded, "recorded call")
            }
            Err(err) => {
                warn!(method = %self.method, error = %err, "failed to record call output")
            }
        }

        result
    }

    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.fetch(key)
    }
}
