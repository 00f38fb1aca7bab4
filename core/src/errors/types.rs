//! Token error types
//!
//! Generation failures (`KeyUnavailable`, `SigningFailed`, `InvalidClaims`)
//! are internal faults the caller cannot recover from. Every other variant is
//! a verification-time rejection: deterministic, terminal, and reported to
//! clients only as "not valid".

use thiserror::Error;

/// Token generation and verification errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing key unavailable")]
    KeyUnavailable,

    #[error("Token signing failed")]
    SigningFailed,

    #[error("Invalid token claims: {reason}")]
    InvalidClaims { reason: String },

    #[error("Malformed token")]
    Malformed,

    #[error("Token signature verification failed")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,

    #[error("Token not yet valid")]
    NotYetValid,

    #[error("Missing required claim: {claim}")]
    ClaimMissing { claim: String },
}

impl TokenError {
    /// Shorthand for a missing claim
    pub fn claim_missing(claim: impl Into<String>) -> Self {
        TokenError::ClaimMissing { claim: claim.into() }
    }

    /// Whether this error rejects a presented credential, as opposed to a
    /// failure to mint one
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::Malformed
                | TokenError::SignatureInvalid
                | TokenError::Expired
                | TokenError::NotYetValid
                | TokenError::ClaimMissing { .. }
        )
    }

    /// Stable machine-readable name, used as a log field
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::KeyUnavailable => "key_unavailable",
            TokenError::SigningFailed => "signing_failed",
            TokenError::InvalidClaims { .. } => "invalid_claims",
            TokenError::Malformed => "malformed",
            TokenError::SignatureInvalid => "signature_invalid",
            TokenError::Expired => "expired",
            TokenError::NotYetValid => "not_yet_valid",
            TokenError::ClaimMissing { .. } => "claim_missing",
        }
    }
}
