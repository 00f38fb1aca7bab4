use serde::{Deserialize, Serialize};
use validator::Validate;

use cb_core::domain::value_objects::TokenPair;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RedirectCodeRequest {
    #[validate(length(min = 1, max = 255))]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedirectCodeResponse {
    pub code: String,
    /// Seconds until the code lapses
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeCodeRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub access_expires_at: i64,
    pub refresh_token: String,
    pub refresh_expires_at: i64,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            access_expires_at: pair.access_expires_at,
            refresh_token: pair.refresh_token,
            refresh_expires_at: pair.refresh_expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSessionRequest {
    pub refresh_token: String,
}
