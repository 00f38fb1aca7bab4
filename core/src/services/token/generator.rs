//! Per-class JWT minting and verification

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::{Claims, SignedToken, TokenClass};
use crate::domain::entities::claims::TokenPayload;
use crate::errors::TokenError;

use super::clock::Clock;
use super::config::TokenClassSettings;
use super::key_manager::Rs256KeyPair;

/// Signs and verifies tokens of one class with that class's keypair
///
/// Time-based checks run against the injected [`Clock`] rather than the
/// library's wall clock, so expiry is exact (`now >= exp` is expired, no
/// leeway) and `iat`/`nbf` only get the configured skew.
pub struct TokenGenerator {
    class: TokenClass,
    keys: Rs256KeyPair,
    ttl_seconds: i64,
    clock_skew_seconds: i64,
    clock: Arc<dyn Clock>,
    validation: Validation,
}

impl TokenGenerator {
    pub fn new(
        class: TokenClass,
        settings: TokenClassSettings,
        clock_skew_seconds: i64,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            class,
            keys: settings.keys,
            ttl_seconds: settings.ttl_seconds,
            clock_skew_seconds,
            clock,
            validation,
        }
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn can_sign(&self) -> bool {
        self.keys.can_sign()
    }

    /// Mints a token carrying `claims`
    ///
    /// Stamps `iat = nbf = now`, `exp = now + ttl` and a fresh random `jti`,
    /// so two tokens from identical claims never share a signature input.
    ///
    /// # Errors
    ///
    /// * `InvalidClaims` - Claims are empty or use a reserved name
    /// * `KeyUnavailable` - This generator holds no private key
    /// * `SigningFailed` - The signing primitive failed
    pub fn generate_token(&self, claims: &Claims) -> Result<SignedToken, TokenError> {
        claims.check_signable()?;

        let encoding_key = self.keys.encoding_key().ok_or_else(|| {
            error!(class = %self.class, "Token requested from a verification-only keypair");
            TokenError::KeyUnavailable
        })?;

        let now = self.clock.now();
        let exp = now.checked_add(self.ttl_seconds).ok_or_else(|| {
            error!(class = %self.class, ttl = self.ttl_seconds, "Token expiry overflows");
            TokenError::SigningFailed
        })?;
        let payload = TokenPayload {
            claims: claims.as_map().clone(),
            iat: now,
            nbf: now,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::RS256), &payload, encoding_key).map_err(|e| {
            error!(class = %self.class, "Failed to sign token: {}", e);
            TokenError::SigningFailed
        })?;

        debug!(class = %self.class, jti = %payload.jti, exp = payload.exp, "Token issued");

        Ok(SignedToken::new(token, payload.exp))
    }

    /// Verifies a token and returns the claims it was minted with
    ///
    /// Signature is checked first, then expiry, then `iat`/`nbf`. The
    /// registered timing claims are stripped from the result.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<TokenPayload>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| map_jwt_error(e.kind()))?;
        let payload = data.claims;

        let now = self.clock.now();
        if now >= payload.exp {
            return Err(TokenError::Expired);
        }
        let latest_start = now.saturating_add(self.clock_skew_seconds);
        if payload.iat > latest_start || payload.nbf > latest_start {
            return Err(TokenError::NotYetValid);
        }

        Ok(Claims::from_map(payload.claims))
    }
}

impl std::fmt::Debug for TokenGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenGenerator")
            .field("class", &self.class)
            .field("keys", &self.keys)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("clock_skew_seconds", &self.clock_skew_seconds)
            .finish()
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::SignatureInvalid,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::ImmatureSignature => TokenError::NotYetValid,
        _ => TokenError::Malformed,
    }
}
