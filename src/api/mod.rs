//! API Module
//!
//! HTTP handlers and routing exposing one shared, instrumented cache.
//!
//! # Endpoints
//! - `PUT /store` - Store a value under a generated key
//! - `GET /fetch/:key` - Fetch a value by key
//! - `GET /replay` / `GET /replay/:method` - Call count and history
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
