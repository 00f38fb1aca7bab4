//! One-time code store configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{parse_or, Lookup};

/// Default number of random bytes in a code (encodes to 43 base64url chars)
pub const DEFAULT_CODE_BYTES: usize = 32;

/// Default timeout for a single store round trip
pub const DEFAULT_OPERATION_TIMEOUT_MS: u64 = 2000;

/// Settings for one instance of the one-time code store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OneTimeCodeConfig {
    /// Prefix prepended to every code to form the store key
    pub key_prefix: String,

    /// Lifetime of an unredeemed code in seconds
    pub ttl_seconds: u64,

    /// Number of random bytes per code
    #[serde(default = "default_code_bytes")]
    pub code_bytes: usize,

    /// Timeout applied to every store call in milliseconds
    #[serde(default = "default_operation_timeout_ms")]
    pub operation_timeout_ms: u64,
}

impl OneTimeCodeConfig {
    /// Create a configuration with default code length and timeout
    pub fn new(key_prefix: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            key_prefix: key_prefix.into(),
            ttl_seconds,
            code_bytes: default_code_bytes(),
            operation_timeout_ms: default_operation_timeout_ms(),
        }
    }

    /// Login code defaults: 5 minute lifetime
    pub fn login() -> Self {
        Self::new("otc:login:", 300)
    }

    /// Redirect bridging defaults: 60 second lifetime
    pub fn redirect() -> Self {
        Self::new("otc:redirect:", 60)
    }

    fn from_lookup(lookup: Lookup<'_>, name: &str, defaults: Self) -> Self {
        let code_bytes = parse_or(lookup, "CODE_BYTES", defaults.code_bytes);
        let operation_timeout_ms =
            parse_or(lookup, "CODE_STORE_TIMEOUT_MS", defaults.operation_timeout_ms);

        Self {
            key_prefix: lookup(&format!("{}_CODE_PREFIX", name)).unwrap_or(defaults.key_prefix),
            ttl_seconds: parse_or(lookup, &format!("{}_CODE_TTL_SECONDS", name), defaults.ttl_seconds),
            code_bytes,
            operation_timeout_ms,
        }
    }
}

/// Which backend holds one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeBackendKind {
    Redis,
    /// In-process store; codes are not shared between instances
    Memory,
}

impl FromStr for CodeBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(CodeBackendKind::Redis),
            "memory" | "in-memory" => Ok(CodeBackendKind::Memory),
            _ => Err(format!("Invalid code store backend: {}", s)),
        }
    }
}

/// Configuration for both one-time code store instances
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeConfig {
    /// Identity-bound login codes
    pub login: OneTimeCodeConfig,

    /// Token-pair redirect bridging codes
    pub redirect: OneTimeCodeConfig,

    /// Storage backend
    pub backend: CodeBackendKind,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            login: OneTimeCodeConfig::login(),
            redirect: OneTimeCodeConfig::redirect(),
            backend: CodeBackendKind::Redis,
        }
    }
}

impl CodeConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            login: OneTimeCodeConfig::from_lookup(lookup, "LOGIN", OneTimeCodeConfig::login()),
            redirect: OneTimeCodeConfig::from_lookup(lookup, "REDIRECT", OneTimeCodeConfig::redirect()),
            backend: parse_or(lookup, "CODE_STORE_BACKEND", CodeBackendKind::Redis),
        }
    }
}

fn default_code_bytes() -> usize {
    DEFAULT_CODE_BYTES
}

fn default_operation_timeout_ms() -> u64 {
    DEFAULT_OPERATION_TIMEOUT_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_config_defaults() {
        let config = CodeConfig::default();
        assert_eq!(config.login.key_prefix, "otc:login:");
        assert_eq!(config.login.ttl_seconds, 300);
        assert_eq!(config.redirect.key_prefix, "otc:redirect:");
        assert_eq!(config.redirect.ttl_seconds, 60);
        assert_eq!(config.login.code_bytes, 32);
        assert_eq!(config.backend, CodeBackendKind::Redis);
    }

    #[test]
    fn test_code_config_from_lookup() {
        let lookup = |key: &str| match key {
            "LOGIN_CODE_PREFIX" => Some("auth:login:".to_string()),
            "REDIRECT_CODE_TTL_SECONDS" => Some("30".to_string()),
            "CODE_BYTES" => Some("24".to_string()),
            "CODE_STORE_BACKEND" => Some("Memory".to_string()),
            _ => None,
        };
        let config = CodeConfig::from_lookup(&lookup);

        assert_eq!(config.login.key_prefix, "auth:login:");
        assert_eq!(config.login.ttl_seconds, 300);
        assert_eq!(config.redirect.ttl_seconds, 30);
        assert_eq!(config.redirect.code_bytes, 24);
        assert_eq!(config.backend, CodeBackendKind::Memory);
    }

    #[test]
    fn test_backend_kind_parse() {
        assert_eq!("redis".parse::<CodeBackendKind>().unwrap(), CodeBackendKind::Redis);
        assert_eq!("in-memory".parse::<CodeBackendKind>().unwrap(), CodeBackendKind::Memory);
        assert!("memcached".parse::<CodeBackendKind>().is_err());
    }
}
