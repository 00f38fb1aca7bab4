//! Verification outcomes exposed to callers.

use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Claims extracted from a valid email verification token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerificationClaims {
    pub user_id: String,
    pub email: String,
    pub code: String,
}

/// Boolean validity plus optional extracted claims
///
/// The rejection reason is deliberately dropped here; callers that need it
/// for logging must look at the `TokenError` before converting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenVerification<T> {
    pub valid: bool,
    pub claims: Option<T>,
}

impl<T> TokenVerification<T> {
    pub fn valid(claims: T) -> Self {
        Self {
            valid: true,
            claims: Some(claims),
        }
    }

    pub fn rejected() -> Self {
        Self {
            valid: false,
            claims: None,
        }
    }
}

impl<T> From<Result<T, TokenError>> for TokenVerification<T> {
    fn from(result: Result<T, TokenError>) -> Self {
        match result {
            Ok(claims) => Self::valid(claims),
            Err(_) => Self::rejected(),
        }
    }
}
