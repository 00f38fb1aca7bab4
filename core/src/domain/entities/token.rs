//! Token entities for JWT-based credentials.

use serde::{Deserialize, Serialize};

/// Subject claim (user identifier)
pub const CLAIM_SUBJECT: &str = "sub";

/// Email claim of email verification tokens
pub const CLAIM_EMAIL: &str = "email";

/// Verification code claim of email verification tokens
pub const CLAIM_CODE: &str = "code";

/// Category of token, each with its own keypair and lifetime
///
/// Classes are never interchangeable: a token minted for one class fails
/// verification under every other class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Access,
    Refresh,
    EmailVerification,
}

impl TokenClass {
    /// All token classes
    pub const ALL: [TokenClass; 3] = [
        TokenClass::Access,
        TokenClass::Refresh,
        TokenClass::EmailVerification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
            TokenClass::EmailVerification => "email_verification",
        }
    }
}

impl std::fmt::Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A freshly minted token and its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedToken {
    /// Compact JWT (`header.payload.signature`)
    pub token: String,

    /// Expiry as Unix seconds
    pub expires_at: i64,
}

impl SignedToken {
    pub fn new(token: String, expires_at: i64) -> Self {
        Self { token, expires_at }
    }
}
