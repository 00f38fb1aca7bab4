use serde::{Deserialize, Serialize};
use validator::Validate;

use cb_core::domain::entities::SignedToken;
use cb_core::domain::value_objects::{EmailVerificationClaims, TokenVerification};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateTokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateEmailVerificationTokenRequest {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub code: String,
}

/// Token to verify; never validated up front so every input gets the same
/// `valid: false` treatment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
}

impl From<SignedToken> for TokenResponse {
    fn from(signed: SignedToken) -> Self {
        Self {
            token: signed.token,
            expires_at: signed.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyTokenResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl From<TokenVerification<String>> for VerifyTokenResponse {
    fn from(verification: TokenVerification<String>) -> Self {
        Self {
            valid: verification.valid,
            user_id: verification.claims,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailVerificationTokenResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<TokenVerification<EmailVerificationClaims>> for VerifyEmailVerificationTokenResponse {
    fn from(verification: TokenVerification<EmailVerificationClaims>) -> Self {
        match verification.claims {
            Some(claims) => Self {
                valid: verification.valid,
                user_id: Some(claims.user_id),
                email: Some(claims.email),
                code: Some(claims.code),
            },
            None => Self {
                valid: false,
                user_id: None,
                email: None,
                code: None,
            },
        }
    }
}
