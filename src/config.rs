//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::backend::DEFAULT_MAX_VALUE_SIZE;
use crate::cache::STORE_METHOD;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Largest value in bytes the in-memory backend accepts
    pub max_value_size: usize,
    /// Flush the store when the cache is built
    pub flush_on_start: bool,
    /// Operation identity the instrumentation records under
    pub history_method: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `MAX_VALUE_SIZE` - Maximum stored value size in bytes (default: 1 MiB)
    /// - `FLUSH_ON_START` - Flush the store on startup (default: true)
    /// - `HISTORY_METHOD` - Instrumented operation identity (default: `Cache.store`)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            max_value_size: env::var("MAX_VALUE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_value_size),
            flush_on_start: env::var("FLUSH_ON_START")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.flush_on_start),
            history_method: env::var("HISTORY_METHOD")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.history_method),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            max_value_size: DEFAULT_MAX_VALUE_SIZE,
            flush_on_start: true,
            history_method: STORE_METHOD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_value_size, 1024 * 1024);
        assert!(config.flush_on_start);
        assert_eq!(config.history_method, "Cache.store");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("MAX_VALUE_SIZE");
        env::remove_var("FLUSH_ON_START");
        env::remove_var("HISTORY_METHOD");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_value_size, DEFAULT_MAX_VALUE_SIZE);
        assert!(config.flush_on_start);
        assert_eq!(config.history_method, STORE_METHOD);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
