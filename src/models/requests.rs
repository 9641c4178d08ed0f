//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::Value;
use crate::error::Result;

/// Request body for the store operation (PUT /store)
///
/// `value` may be a JSON string, integer, float or array of bytes.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The value to store, checked by [`StoreRequest::into_value`]
    pub value: serde_json::Value,
}

impl StoreRequest {
    /// Converts the raw JSON into a storable value.
    pub fn into_value(self) -> Result<Value> {
        Value::try_from(self.value)
    }
}

/// How the fetch endpoint decodes stored bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decode {
    /// Raw bytes, returned as an array
    #[default]
    Raw,
    /// UTF-8 text
    Text,
    /// Big-endian unsigned integer
    Int,
}

/// Query string for the fetch operation (GET /fetch/:key)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchQuery {
    #[serde(default)]
    pub decode: Decode,
}
