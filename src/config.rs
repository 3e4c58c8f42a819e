//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::cache::{LoadMode, DEFAULT_TTL};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Absolute origin used to build callback URLs
    pub base_url: String,
    /// Deferred-load mode of the cache gateway
    pub mode: LoadMode,
    /// TTL in seconds of elements built by the gateway
    pub default_ttl: u64,
    /// JSON file of blocks seeding the in-memory store
    pub blocks_file: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PUBLIC_BASE_URL` - Origin of callback URLs (default: http://localhost:3000)
    /// - `BLOCK_LOAD_MODE` - `sync` or `async` (default: async)
    /// - `BLOCK_TTL` - Element TTL in seconds (default: 86400)
    /// - `BLOCKS_FILE` - Optional block fixtures
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            mode: parsed("BLOCK_LOAD_MODE").unwrap_or(defaults.mode),
            default_ttl: parsed("BLOCK_TTL").unwrap_or(defaults.default_ttl),
            blocks_file: env::var_os("BLOCKS_FILE").map(PathBuf::from),
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            base_url: "http://localhost:3000".to_string(),
            mode: LoadMode::Async,
            default_ttl: DEFAULT_TTL,
            blocks_file: None,
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
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.mode, LoadMode::Async);
        assert_eq!(config.default_ttl, 86_400);
        assert!(config.blocks_file.is_none());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("PUBLIC_BASE_URL");
        env::remove_var("BLOCK_LOAD_MODE");
        env::remove_var("BLOCK_TTL");
        env::remove_var("BLOCKS_FILE");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.mode, LoadMode::Async);
        assert_eq!(config.default_ttl, 86_400);
        assert!(config.blocks_file.is_none());
    }
}
