//! Configuration for the token service

use cb_shared::config::{TokenClassConfig, TokenConfig};

use crate::domain::entities::TokenClass;
use crate::errors::{DomainError, DomainResult};

use super::key_manager::Rs256KeyPair;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 366 * 24 * 60 * 60;

/// Keypair and lifetime bound to one token class
#[derive(Debug, Clone)]
pub struct TokenClassSettings {
    pub keys: Rs256KeyPair,
    /// Token lifetime in seconds, strictly positive
    pub ttl_seconds: i64,
}

impl TokenClassSettings {
    pub fn new(keys: Rs256KeyPair, ttl_seconds: i64) -> Self {
        Self { keys, ttl_seconds }
    }

    fn load(config: &TokenClassConfig) -> DomainResult<Self> {
        let keys = Rs256KeyPair::from_files(
            config.private_key_path.as_deref(),
            &config.public_key_path,
        )?;
        Ok(Self::new(keys, config.ttl_seconds))
    }
}

/// Immutable key material and lifetimes for all token classes
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    pub access: TokenClassSettings,
    pub refresh: TokenClassSettings,
    pub email_verification: TokenClassSettings,
    /// Tolerated clock skew for `iat`/`nbf` in seconds
    pub clock_skew_seconds: i64,
}

impl TokenServiceConfig {
    /// Loads every class's keypair from the paths in `config`
    pub fn load(config: &TokenConfig) -> DomainResult<Self> {
        let loaded = Self {
            access: TokenClassSettings::load(&config.access)?,
            refresh: TokenClassSettings::load(&config.refresh)?,
            email_verification: TokenClassSettings::load(&config.email_verification)?,
            clock_skew_seconds: config.clock_skew_seconds,
        };
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn settings(&self, class: TokenClass) -> &TokenClassSettings {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
            TokenClass::EmailVerification => &self.email_verification,
        }
    }

    /// Rejects configurations that would weaken class separation or expiry
    pub fn validate(&self) -> DomainResult<()> {
        if self.clock_skew_seconds < 0 {
            return Err(DomainError::Configuration {
                message: "clock skew must not be negative".to_string(),
            });
        }

        for class in TokenClass::ALL {
            let settings = self.settings(class);
            if settings.ttl_seconds <= 0 {
                return Err(DomainError::Configuration {
                    message: format!("{} token lifetime must be positive", class),
                });
            }
            if settings.ttl_seconds > MAX_TOKEN_TTL_SECONDS {
                return Err(DomainError::Configuration {
                    message: format!(
                        "{} token lifetime must not exceed {} seconds",
                        class, MAX_TOKEN_TTL_SECONDS
                    ),
                });
            }
            settings.keys.check_pair()?;
        }

        for (i, first) in TokenClass::ALL.iter().enumerate() {
            for second in &TokenClass::ALL[i + 1..] {
                if self.settings(*first).keys.shares_public_key(&self.settings(*second).keys) {
                    return Err(DomainError::Configuration {
                        message: format!("{} and {} tokens must use distinct keypairs", first, second),
                    });
                }
            }
        }

        Ok(())
    }
}
