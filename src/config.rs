//! Configuration Module
//!
//! Handles loading and managing console configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheSettings;

/// Console configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote loan-origination API
    pub api_base_url: String,
    /// Optional bearer token forwarded to the remote API
    pub api_token: Option<String>,
    /// Age in seconds after which a cache entry is stale
    pub stale_after: u64,
    /// Interval in seconds between background refreshes of a cached query
    pub refresh_interval: u64,
    /// Page size used when a query does not name one
    pub default_page_size: u32,
    /// Upstream request timeout in seconds
    pub request_timeout: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Buffered change notifications per store before slow subscribers lag
    pub event_channel_capacity: usize,
}

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api/";

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `API_BASE_URL` - Remote API base URL (default: http://127.0.0.1:8000/api/)
    /// - `API_TOKEN` - Bearer token for the remote API (default: none)
    /// - `STALE_AFTER_SECS` - Staleness window in seconds (default: 60)
    /// - `REFRESH_INTERVAL_SECS` - Background refresh interval (default: 60)
    /// - `DEFAULT_PAGE_SIZE` - Page size for queries without one (default: 10)
    /// - `REQUEST_TIMEOUT_SECS` - Upstream request timeout (default: 30)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `EVENT_CHANNEL_CAPACITY` - Notification buffer per store (default: 64)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),
            stale_after: parse_var("STALE_AFTER_SECS").unwrap_or(defaults.stale_after),
            refresh_interval: parse_var("REFRESH_INTERVAL_SECS")
                .unwrap_or(defaults.refresh_interval),
            default_page_size: parse_var("DEFAULT_PAGE_SIZE")
                .filter(|size: &u32| *size > 0)
                .unwrap_or(defaults.default_page_size),
            request_timeout: parse_var("REQUEST_TIMEOUT_SECS").unwrap_or(defaults.request_timeout),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            event_channel_capacity: parse_var("EVENT_CHANNEL_CAPACITY")
                .filter(|cap: &usize| *cap > 0)
                .unwrap_or(defaults.event_channel_capacity),
        }
    }

    /// Settings shared by every cache store.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings {
            stale_after: Duration::from_secs(self.stale_after),
            refresh_interval: Duration::from_secs(self.refresh_interval),
            default_page_size: self.default_page_size,
            event_capacity: self.event_channel_capacity,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            stale_after: 60,
            refresh_interval: 60,
            default_page_size: 10,
            request_timeout: 30,
            server_port: 3000,
            event_channel_capacity: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.stale_after, 60);
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("STALE_AFTER_SECS");
        env::remove_var("REFRESH_INTERVAL_SECS");
        env::remove_var("DEFAULT_PAGE_SIZE");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.stale_after, 60);
        assert_eq!(config.refresh_interval, 60);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_cache_settings_conversion() {
        let config = Config {
            stale_after: 5,
            refresh_interval: 7,
            ..Config::default()
        };
        let settings = config.cache_settings();
        assert_eq!(settings.stale_after, Duration::from_secs(5));
        assert_eq!(settings.refresh_interval, Duration::from_secs(7));
        assert_eq!(settings.default_page_size, 10);
    }
}
