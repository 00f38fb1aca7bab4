//! Token service facade over the per-class generators

use std::sync::Arc;

use cb_shared::config::TokenConfig;
use tracing::debug;

use crate::domain::entities::{
    Claims, SignedToken, TokenClass, CLAIM_CODE, CLAIM_EMAIL, CLAIM_SUBJECT,
};
use crate::domain::value_objects::{EmailVerificationClaims, TokenPair};
use crate::errors::{DomainResult, TokenError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;
use super::generator::TokenGenerator;

/// Service for minting and verifying access, refresh and email verification
/// tokens
///
/// Each class is served by its own [`TokenGenerator`], so a token minted for
/// one class cannot verify under another.
#[derive(Debug)]
pub struct TokenService {
    access: TokenGenerator,
    refresh: TokenGenerator,
    email_verification: TokenGenerator,
}

impl TokenService {
    /// Creates a token service reading time from the system clock
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Ready to use
    /// * `Err(DomainError::Configuration)` - Lifetimes, skew or key separation invalid
    pub fn new(config: TokenServiceConfig) -> DomainResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an explicit time source
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        config.validate()?;

        let skew = config.clock_skew_seconds;
        Ok(Self {
            access: TokenGenerator::new(TokenClass::Access, config.access, skew, clock.clone()),
            refresh: TokenGenerator::new(TokenClass::Refresh, config.refresh, skew, clock.clone()),
            email_verification: TokenGenerator::new(
                TokenClass::EmailVerification,
                config.email_verification,
                skew,
                clock,
            ),
        })
    }

    /// Loads keypairs from the configured paths and builds the service
    pub fn from_config(config: &TokenConfig) -> DomainResult<Self> {
        Self::new(TokenServiceConfig::load(config)?)
    }

    pub fn generator(&self, class: TokenClass) -> &TokenGenerator {
        match class {
            TokenClass::Access => &self.access,
            TokenClass::Refresh => &self.refresh,
            TokenClass::EmailVerification => &self.email_verification,
        }
    }

    /// Generates an access token whose subject is `user_id`
    pub fn generate_access_token(&self, user_id: &str) -> Result<SignedToken, TokenError> {
        self.generate_subject_token(TokenClass::Access, user_id)
    }

    /// Verifies an access token and returns its user id
    pub fn verify_access_token(&self, token: &str) -> Result<String, TokenError> {
        self.verify_subject_token(TokenClass::Access, token)
    }

    /// Generates a refresh token whose subject is `user_id`
    pub fn generate_refresh_token(&self, user_id: &str) -> Result<SignedToken, TokenError> {
        self.generate_subject_token(TokenClass::Refresh, user_id)
    }

    /// Verifies a refresh token and returns its user id
    pub fn verify_refresh_token(&self, token: &str) -> Result<String, TokenError> {
        self.verify_subject_token(TokenClass::Refresh, token)
    }

    /// Generates an email verification token binding `user_id`, `email` and
    /// the verification `code`
    pub fn generate_email_verification_token(
        &self,
        user_id: &str,
        email: &str,
        code: &str,
    ) -> Result<SignedToken, TokenError> {
        require_non_empty(CLAIM_SUBJECT, user_id)?;
        require_non_empty(CLAIM_EMAIL, email)?;
        require_non_empty(CLAIM_CODE, code)?;

        let claims = Claims::new()
            .with(CLAIM_SUBJECT, user_id)
            .with(CLAIM_EMAIL, email)
            .with(CLAIM_CODE, code);
        self.email_verification.generate_token(&claims)
    }

    /// Verifies an email verification token
    ///
    /// Fails with `ClaimMissing` unless the subject, email and code are all
    /// present and non-empty.
    pub fn verify_email_verification_token(
        &self,
        token: &str,
    ) -> Result<EmailVerificationClaims, TokenError> {
        let result = self
            .email_verification
            .verify_token(token)
            .and_then(|claims| {
                Ok(EmailVerificationClaims {
                    user_id: claims.require(CLAIM_SUBJECT)?.to_string(),
                    email: claims.require(CLAIM_EMAIL)?.to_string(),
                    code: claims.require(CLAIM_CODE)?.to_string(),
                })
            });
        log_rejection(TokenClass::EmailVerification, &result);
        result
    }

    /// Generates an access and refresh token for the same user
    pub fn generate_token_pair(&self, user_id: &str) -> Result<TokenPair, TokenError> {
        let access = self.generate_access_token(user_id)?;
        let refresh = self.generate_refresh_token(user_id)?;
        Ok(TokenPair::new(access, refresh))
    }

    fn generate_subject_token(
        &self,
        class: TokenClass,
        user_id: &str,
    ) -> Result<SignedToken, TokenError> {
        require_non_empty(CLAIM_SUBJECT, user_id)?;
        let claims = Claims::new().with(CLAIM_SUBJECT, user_id);
        self.generator(class).generate_token(&claims)
    }

    fn verify_subject_token(&self, class: TokenClass, token: &str) -> Result<String, TokenError> {
        let result = self
            .generator(class)
            .verify_token(token)
            .and_then(|claims| claims.require(CLAIM_SUBJECT).map(str::to_string));
        log_rejection(class, &result);
        result
    }
}

fn require_non_empty(claim: &str, value: &str) -> Result<(), TokenError> {
    if value.is_empty() {
        return Err(TokenError::InvalidClaims {
            reason: format!("'{}' must not be empty", claim),
        });
    }
    Ok(())
}

fn log_rejection<T>(class: TokenClass, result: &Result<T, TokenError>) {
    if let Err(err) = result {
        debug!(class = %class, reason = err.code(), "Token rejected");
    }
}
