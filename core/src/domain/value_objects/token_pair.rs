//! Access + refresh token pair issued after a successful login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::SignedToken;

/// Access and refresh tokens minted together for one login
///
/// This is also the blob stored behind a redirect code, so its JSON shape is
/// part of the code store format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub access_expires_at: i64,
    pub refresh_token: String,
    pub refresh_expires_at: i64,
}

impl TokenPair {
    pub fn new(access: SignedToken, refresh: SignedToken) -> Self {
        Self {
            access_token: access.token,
            access_expires_at: access.expires_at,
            refresh_token: refresh.token,
            refresh_expires_at: refresh.expires_at,
        }
    }
}
