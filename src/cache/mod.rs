//! Cache Module
//!
//! The store facade, its instrumenting wrappers and the replay report.
//!
//! Every layer implements [`KeyValueCache`], so instrumentation is plain
//! composition: `CountCalls<CallHistory<Cache>>` counts, then records, then
//! stores.

mod count;
mod history;
mod replay;
mod store;
mod value;


// Re-export public types
pub use count::{call_count, CountCalls};
pub use history::{inputs_key, outputs_key, CallHistory, FAILURE_MARKER};
pub use replay::{replay, replay_to, CallRecord, History};
pub use store::{Cache, Instrumented};
pub use value::{decode_int, decode_text, render_args, Value};

use crate::error::{CacheError, Result};

// == Public Constants ==
/// Identity under which the `store` operation is counted and recorded
pub const STORE_METHOD: &str = "Cache.store";

// == Key Value Cache ==
/// The facade's capability: store values under fresh keys and read them back.
pub trait KeyValueCache {
    /// Stores `value` under a newly generated key and returns the key.
    fn store(&self, value: Value) -> Result<String>;

    /// Returns the raw bytes under `key`, or `None` if it was never stored.
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

// == Fetch Helpers ==
/// Decoding variants of [`KeyValueCache::fetch`], available on every cache.
pub trait FetchExt: KeyValueCache {
    /// Fetches `key` and passes the raw bytes through `decoder`.
    ///
    /// The decoder is not called for absent keys. Its error is returned as is.
    fn fetch_with<T, E, F>(&self, key: &str, decoder: F) -> std::result::Result<Option<T>, E>
    where
        F: FnOnce(Vec<u8>) -> std::result::Result<T, E>,
        E: From<CacheError>,
    {
        match self.fetch(key)? {
            Some(raw) => decoder(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Fetches `key` as UTF-8 text.
    fn fetch_str(&self, key: &str) -> Result<Option<String>> {
        self.fetch_with(key, decode_text)
    }

    /// Fetches `key` as a big-endian unsigned integer.
    fn fetch_int(&self, key: &str) -> Result<Option<u64>> {
        self.fetch_with(key, decode_int)
    }
}

impl<C: KeyValueCache + ?Sized> FetchExt for C {}
