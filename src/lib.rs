//! Call History Cache - A key-value cache with call counting and replay
//!
//! Stores values under random keys, counts and records every `store` call,
//! and replays the recorded history on demand.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use backend::{Backend, MemoryBackend, SharedBackend};
pub use cache::{replay, Cache, FetchExt, History, KeyValueCache, Value};
pub use config::Config;
pub use error::{CacheError, Result};
