//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Per-class token key material and lifetimes
//! - `codes` - One-time code store prefixes, lifetimes and backend selection
//! - `cache` - Redis connection configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server configuration
//!
//! Every `from_env` constructor has a `from_lookup` twin that takes the
//! variable source as a closure, so configuration parsing can be tested
//! without touching the process environment.

pub mod auth;
pub mod cache;
pub mod codes;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use auth::{TokenClassConfig, TokenConfig};
pub use cache::CacheConfig;
pub use codes::{CodeBackendKind, CodeConfig, OneTimeCodeConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Source of configuration variables (usually `std::env::var`)
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when the variable is unset or unparseable.
pub(crate) fn parse_or<T: FromStr>(lookup: Lookup<'_>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Token class configuration
    pub tokens: TokenConfig,

    /// One-time code configuration
    pub codes: CodeConfig,

    /// Redis configuration
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        let environment = Environment::from_lookup(lookup);
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = lookup("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_lookup(lookup),
            tokens: TokenConfig::from_lookup(lookup),
            codes: CodeConfig::from_lookup(lookup),
            cache: CacheConfig::from_lookup(lookup),
            logging,
        }
    }
}
