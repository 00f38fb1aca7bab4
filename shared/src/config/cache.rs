//! Cache configuration module

use serde::{Deserialize, Serialize};

use super::{parse_or, Lookup};

/// Redis cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection attempts made at start-up before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Base delay between connection attempts in milliseconds (doubles each attempt)
    #[serde(default = "default_connect_retry_delay_ms")]
    pub connect_retry_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connect_retries: default_connect_retries(),
            connect_retry_delay_ms: default_connect_retry_delay_ms(),
        }
    }
}

impl CacheConfig {
    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let defaults = Self::default();
        Self {
            url: lookup("REDIS_URL").unwrap_or(defaults.url),
            connect_retries: parse_or(lookup, "REDIS_CONNECT_RETRIES", defaults.connect_retries),
            connect_retry_delay_ms: parse_or(
                lookup,
                "REDIS_CONNECT_RETRY_DELAY_MS",
                defaults.connect_retry_delay_ms,
            ),
        }
    }
}

fn default_connect_retries() -> u32 {
    3
}

fn default_connect_retry_delay_ms() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.connect_retries, 3);
        assert_eq!(config.connect_retry_delay_ms, 100);
    }

    #[test]
    fn test_cache_config_from_lookup() {
        let lookup = |key: &str| match key {
            "REDIS_URL" => Some("redis://cache:6380/2".to_string()),
            "REDIS_CONNECT_RETRIES" => Some("5".to_string()),
            _ => None,
        };
        let config = CacheConfig::from_lookup(&lookup);
        assert_eq!(config.url, "redis://cache:6380/2");
        assert_eq!(config.connect_retries, 5);
    }
}
