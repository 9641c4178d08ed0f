//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::debug;

use crate::backend::{MemoryBackend, SharedBackend};
use crate::cache::{Cache, FetchExt, History, Instrumented, KeyValueCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    Decode, FetchQuery, FetchResponse, HealthResponse, ReplayResponse, StoreRequest,
    StoreResponse,
};

/// Application state shared across all handlers.
///
/// Holds one instrumented cache and the backend it records into.
#[derive(Clone)]
pub struct AppState {
    /// Counted and recorded cache
    pub cache: Arc<Instrumented>,
    /// Store shared by the cache and the replay endpoint
    pub backend: SharedBackend,
}

impl AppState {
    /// Creates a new AppState recording `store` calls under `method`.
    pub fn new(backend: SharedBackend, method: impl Into<String>) -> Self {
        Self {
            cache: Arc::new(Cache::instrumented_as(backend.clone(), method)),
            backend,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds an in-memory backend, flushing it first when configured to.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = MemoryBackend::shared(config.max_value_size);
        if config.flush_on_start {
            backend.flush()?;
        }
        Ok(Self::new(backend, config.history_method.clone()))
    }

    /// Operation identity the cache records under.
    pub fn method(&self) -> &str {
        self.cache.method()
    }
}

/// Handler for PUT /store
///
/// Stores a value under a generated key.
pub async fn store_handler(
    State(state): State<AppState>,
    Json(req): Json<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    let key = state.cache.store(req.into_value()?)?;
    Ok(Json(StoreResponse::new(key)))
}

/// Handler for GET /fetch/:key
///
/// Fetches a stored value, decoded as raw bytes, text or integer.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<FetchResponse>> {
    debug!(key = %key, decode = ?query.decode, "fetch");
    let cache = &state.cache;

    let value: Option<serde_json::Value> = match query.decode {
        Decode::Raw => cache.fetch(&key)?.map(Into::into),
        Decode::Text => cache.fetch_str(&key)?.map(Into::into),
        Decode::Int => cache.fetch_int(&key)?.map(Into::into),
    };

    match value {
        Some(value) => Ok(Json(FetchResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for GET /replay
///
/// Returns the history of the cache's own instrumented operation.
pub async fn replay_default_handler(
    State(state): State<AppState>,
) -> Result<Json<ReplayResponse>> {
    let history = History::load(state.backend.as_ref(), state.method())?;
    Ok(Json(history.into()))
}

/// Handler for GET /replay/:method
///
/// Returns the call count and paired history of an operation.
pub async fn replay_handler(
    State(state): State<AppState>,
    Path(method): Path<String>,
) -> Result<Json<ReplayResponse>> {
    let history = History::load(state.backend.as_ref(), &method)?;
    Ok(Json(history.into()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
