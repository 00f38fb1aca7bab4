//! Token class configuration
//!
//! Each token class (access, refresh, email verification) has its own RSA
//! keypair and lifetime. Leaving the private key path unset produces a
//! verification-only class.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{parse_or, Lookup};

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 900;

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TTL_SECONDS: i64 = 604_800;

/// Default email verification token lifetime (24 hours)
pub const DEFAULT_EMAIL_VERIFICATION_TTL_SECONDS: i64 = 86_400;

/// Default tolerated clock skew for `iat`/`nbf` checks
pub const DEFAULT_CLOCK_SKEW_SECONDS: i64 = 30;

/// Key material location and lifetime for a single token class
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenClassConfig {
    /// PEM-encoded RSA private key used for signing
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,

    /// PEM-encoded RSA public key used for verification
    pub public_key_path: PathBuf,

    /// Token lifetime in seconds
    pub ttl_seconds: i64,
}

impl TokenClassConfig {
    /// Create a class configuration from key paths
    pub fn new(
        private_key_path: impl Into<PathBuf>,
        public_key_path: impl Into<PathBuf>,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            private_key_path: Some(private_key_path.into()),
            public_key_path: public_key_path.into(),
            ttl_seconds,
        }
    }

    /// Read `TOKEN_<CLASS>_PRIVATE_KEY_PATH`, `TOKEN_<CLASS>_PUBLIC_KEY_PATH`
    /// and `TOKEN_<CLASS>_TTL_SECONDS`
    fn from_lookup(lookup: Lookup<'_>, class: &str, default_ttl: i64) -> Self {
        let lower = class.to_lowercase();
        let private_key_path = lookup(&format!("TOKEN_{}_PRIVATE_KEY_PATH", class))
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let public_key_path = lookup(&format!("TOKEN_{}_PUBLIC_KEY_PATH", class))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(format!("keys/{}_public.pem", lower)));

        Self {
            private_key_path,
            public_key_path,
            ttl_seconds: parse_or(lookup, &format!("TOKEN_{}_TTL_SECONDS", class), default_ttl),
        }
    }

    /// Whether this class can mint tokens
    pub fn can_sign(&self) -> bool {
        self.private_key_path.is_some()
    }
}

/// Configuration for all token classes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    pub access: TokenClassConfig,
    pub refresh: TokenClassConfig,
    pub email_verification: TokenClassConfig,

    /// Allowed clock skew in seconds when checking `iat`/`nbf`
    #[serde(default = "default_clock_skew")]
    pub clock_skew_seconds: i64,
}

impl TokenConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable source
    pub fn from_lookup(lookup: Lookup<'_>) -> Self {
        Self {
            access: TokenClassConfig::from_lookup(lookup, "ACCESS", DEFAULT_ACCESS_TTL_SECONDS),
            refresh: TokenClassConfig::from_lookup(lookup, "REFRESH", DEFAULT_REFRESH_TTL_SECONDS),
            email_verification: TokenClassConfig::from_lookup(
                lookup,
                "EMAIL_VERIFICATION",
                DEFAULT_EMAIL_VERIFICATION_TTL_SECONDS,
            ),
            clock_skew_seconds: parse_or(lookup, "TOKEN_CLOCK_SKEW_SECONDS", default_clock_skew()),
        }
    }
}

fn default_clock_skew() -> i64 {
    DEFAULT_CLOCK_SKEW_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_defaults() {
        let config = TokenConfig::from_lookup(&|_| None);

        assert_eq!(config.access.ttl_seconds, 900);
        assert_eq!(config.refresh.ttl_seconds, 604_800);
        assert_eq!(config.email_verification.ttl_seconds, 86_400);
        assert_eq!(config.clock_skew_seconds, 30);
        assert!(!config.access.can_sign());
        assert_eq!(
            config.email_verification.public_key_path,
            PathBuf::from("keys/email_verification_public.pem")
        );
    }

    #[test]
    fn test_token_config_reads_class_variables() {
        let lookup = |key: &str| match key {
            "TOKEN_REFRESH_PRIVATE_KEY_PATH" => Some("/etc/keys/refresh.pem".to_string()),
            "TOKEN_REFRESH_PUBLIC_KEY_PATH" => Some("/etc/keys/refresh.pub".to_string()),
            "TOKEN_REFRESH_TTL_SECONDS" => Some("1209600".to_string()),
            "TOKEN_ACCESS_PRIVATE_KEY_PATH" => Some("  ".to_string()),
            _ => None,
        };
        let config = TokenConfig::from_lookup(&lookup);

        assert!(config.refresh.can_sign());
        assert_eq!(config.refresh.ttl_seconds, 1_209_600);
        assert_eq!(config.refresh.public_key_path, PathBuf::from("/etc/keys/refresh.pub"));
        // blank path means verification-only
        assert!(!config.access.can_sign());
    }
}
