//! Session bridge implementation

use std::sync::Arc;

use cb_shared::utils::mask::mask_secret;
use tracing::{debug, info};

use crate::domain::entities::SignedToken;
use crate::domain::value_objects::TokenPair;
use crate::errors::DomainResult;
use crate::services::one_time_code::RedirectCodeStore;
use crate::services::token::TokenService;

/// Turns an externally authenticated user into a session
///
/// After a credential check succeeds elsewhere, the bridge mints the
/// access/refresh pair and either hands it over directly or parks it behind
/// a short-lived redirect code so the tokens never appear in a URL.
pub struct SessionBridge {
    tokens: Arc<TokenService>,
    redirect_codes: Arc<RedirectCodeStore>,
}

impl SessionBridge {
    pub fn new(tokens: Arc<TokenService>, redirect_codes: Arc<RedirectCodeStore>) -> Self {
        Self {
            tokens,
            redirect_codes,
        }
    }

    /// Mints a token pair for `user_id`
    pub fn issue_session(&self, user_id: &str) -> DomainResult<TokenPair> {
        let pair = self.tokens.generate_token_pair(user_id)?;
        info!(user = %mask_secret(user_id), "Session issued");
        Ok(pair)
    }

    /// Mints a token pair for `user_id` and stores it behind a redirect code
    pub async fn issue_redirect_code(&self, user_id: &str) -> DomainResult<String> {
        let pair = self.tokens.generate_token_pair(user_id)?;
        let code = self.redirect_codes.issue_code(&pair).await?;
        info!(user = %mask_secret(user_id), "Session parked behind redirect code");
        Ok(code)
    }

    /// Exchanges a redirect code for the token pair stored behind it
    ///
    /// Succeeds at most once per code; later or unknown codes yield `None`.
    pub async fn exchange_redirect_code(&self, code: &str) -> DomainResult<Option<TokenPair>> {
        self.redirect_codes.redeem_code(code).await
    }

    /// Mints a fresh access token from a valid refresh token
    ///
    /// # Errors
    ///
    /// * `DomainError::Token` - The refresh token was rejected, or the access
    ///   token could not be signed
    pub fn refresh_session(&self, refresh_token: &str) -> DomainResult<SignedToken> {
        let user_id = self.tokens.verify_refresh_token(refresh_token)?;
        let access = self.tokens.generate_access_token(&user_id)?;
        debug!(user = %mask_secret(&user_id), "Access token refreshed");
        Ok(access)
    }
}
