//! One-time code store implementation

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use cb_shared::config::OneTimeCodeConfig;
use cb_shared::utils::mask::mask_secret;
use tracing::{debug, info, warn};

use crate::domain::entities::{CodePayload, OneTimeCode, MIN_CODE_BYTES};
use crate::domain::value_objects::TokenPair;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::code_store::{CodeCheck, CodeStoreBackend};

/// Fresh codes tried before giving up when `set_if_absent` reports a collision
const MAX_ISSUE_ATTEMPTS: usize = 3;

/// Longest accepted code lifetime (one day)
pub const MAX_CODE_TTL_SECONDS: u64 = 24 * 60 * 60;

/// Codes standing in for a user identity after login
pub type LoginCodeStore = OneTimeCodeStore<String>;

/// Codes standing in for a token pair across an HTTP redirect
pub type RedirectCodeStore = OneTimeCodeStore<TokenPair>;

/// Single-use code store over a key-value backend
///
/// Codes are stored under `prefix + code`; the same function builds the key
/// for issuing, validating, redeeming and revoking. Redemption relies on the
/// backend's atomic primitives, so a code can be consumed at most once even
/// under concurrent requests.
pub struct OneTimeCodeStore<P: CodePayload> {
    backend: Arc<dyn CodeStoreBackend>,
    config: OneTimeCodeConfig,
    timeout: Duration,
    _payload: PhantomData<fn() -> P>,
}

impl<P: CodePayload> OneTimeCodeStore<P> {
    /// Creates a code store
    ///
    /// # Returns
    ///
    /// * `Ok(OneTimeCodeStore)` - Ready to use
    /// * `Err(DomainError::Configuration)` - Empty prefix, zero or oversized
    ///   lifetime, or codes shorter than the minimum length
    pub fn new(backend: Arc<dyn CodeStoreBackend>, config: OneTimeCodeConfig) -> DomainResult<Self> {
        if config.key_prefix.is_empty() {
            return Err(DomainError::Configuration {
                message: "code key prefix must not be empty".to_string(),
            });
        }
        if config.ttl_seconds == 0 {
            return Err(DomainError::Configuration {
                message: format!("code lifetime for '{}' must be positive", config.key_prefix),
            });
        }
        if config.ttl_seconds > MAX_CODE_TTL_SECONDS {
            return Err(DomainError::Configuration {
                message: format!(
                    "code lifetime for '{}' must not exceed {} seconds",
                    config.key_prefix, MAX_CODE_TTL_SECONDS
                ),
            });
        }
        if config.code_bytes < MIN_CODE_BYTES {
            return Err(DomainError::Configuration {
                message: format!("codes need at least {} random bytes", MIN_CODE_BYTES),
            });
        }

        Ok(Self {
            backend,
            timeout: Duration::from_millis(config.operation_timeout_ms),
            config,
            _payload: PhantomData,
        })
    }

    pub fn config(&self) -> &OneTimeCodeConfig {
        &self.config
    }

    fn key(&self, code: &str) -> String {
        format!("{}{}", self.config.key_prefix, code)
    }

    fn is_well_formed(&self, code: &str) -> bool {
        OneTimeCode::is_well_formed(code, self.config.code_bytes)
    }

    /// Issues a fresh code mapped to `payload`
    ///
    /// The code lives for the configured lifetime unless redeemed first.
    pub async fn issue_code(&self, payload: &P) -> DomainResult<String> {
        let value = payload.encode()?;

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let code = OneTimeCode::generate(self.config.code_bytes);
            let key = self.key(&code);
            let stored = self
                .bounded(
                    "set_if_absent",
                    self.backend.set_if_absent(&key, &value, self.config.ttl_seconds),
                )
                .await?;

            if stored {
                info!(
                    prefix = %self.config.key_prefix,
                    code = %mask_secret(&code),
                    ttl = self.config.ttl_seconds,
                    "One-time code issued"
                );
                return Ok(code);
            }
            warn!(prefix = %self.config.key_prefix, "One-time code collision, drawing a new code");
        }

        Err(DomainError::Store {
            message: "could not allocate a unique one-time code".to_string(),
        })
    }

    /// Validates `code` against `identity` and consumes it on success
    ///
    /// Returns `Ok(false)` for unknown, expired, already used or malformed
    /// codes. A code presented with the wrong identity also yields
    /// `Ok(false)` but stays redeemable by its rightful owner.
    pub async fn validate_code(&self, identity: &P, code: &str) -> DomainResult<bool> {
        if !self.is_well_formed(code) {
            debug!(prefix = %self.config.key_prefix, "Rejected malformed one-time code");
            return Ok(false);
        }

        let expected = identity.encode()?;
        let key = self.key(code);
        let check = self
            .bounded(
                "compare_and_delete",
                self.backend.compare_and_delete(&key, &expected),
            )
            .await?;

        match check {
            CodeCheck::Matched => {
                info!(prefix = %self.config.key_prefix, code = %mask_secret(code), "One-time code redeemed");
            }
            CodeCheck::Mismatched => {
                warn!(
                    prefix = %self.config.key_prefix,
                    code = %mask_secret(code),
                    "One-time code presented with a different identity"
                );
            }
            CodeCheck::Missing => {
                debug!(
                    prefix = %self.config.key_prefix,
                    code = %mask_secret(code),
                    "One-time code not found or expired"
                );
            }
        }

        Ok(check.is_matched())
    }

    /// Consumes `code` and returns the payload it was issued for
    ///
    /// Returns `Ok(None)` for unknown, expired, already used or malformed
    /// codes.
    pub async fn redeem_code(&self, code: &str) -> DomainResult<Option<P>> {
        if !self.is_well_formed(code) {
            debug!(prefix = %self.config.key_prefix, "Rejected malformed one-time code");
            return Ok(None);
        }

        let key = self.key(code);
        let raw = self
            .bounded("get_and_delete", self.backend.get_and_delete(&key))
            .await?;

        match raw {
            Some(raw) => {
                info!(prefix = %self.config.key_prefix, code = %mask_secret(code), "One-time code redeemed");
                P::decode(&raw).map(Some)
            }
            None => {
                debug!(
                    prefix = %self.config.key_prefix,
                    code = %mask_secret(code),
                    "One-time code not found or expired"
                );
                Ok(None)
            }
        }
    }

    /// Invalidates `code` without redeeming it
    pub async fn revoke_code(&self, code: &str) -> DomainResult<bool> {
        if !self.is_well_formed(code) {
            return Ok(false);
        }
        let key = self.key(code);
        let removed = self.bounded("delete", self.backend.delete(&key)).await?;
        if removed {
            info!(prefix = %self.config.key_prefix, code = %mask_secret(code), "One-time code revoked");
        }
        Ok(removed)
    }

    /// Remaining lifetime of `code` in seconds, `None` once gone
    pub async fn remaining_ttl(&self, code: &str) -> DomainResult<Option<i64>> {
        if !self.is_well_formed(code) {
            return Ok(None);
        }
        let key = self.key(code);
        self.bounded("ttl", self.backend.ttl(&key)).await
    }

    /// Runs one backend call under the configured timeout
    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = DomainResult<T>>,
    ) -> DomainResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    prefix = %self.config.key_prefix,
                    operation,
                    timeout_ms = self.config.operation_timeout_ms,
                    "Code store call timed out"
                );
                Err(DomainError::Store {
                    message: format!("{} timed out", operation),
                })
            }
        }
    }
}

impl<P: CodePayload> std::fmt::Debug for OneTimeCodeStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneTimeCodeStore")
            .field("config", &self.config)
            .finish()
    }
}
