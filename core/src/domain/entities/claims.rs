//! Claims carried inside a signed token.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

/// Claim names owned by the token generator. Callers may not set them.
pub const RESERVED_CLAIMS: [&str; 4] = ["iat", "nbf", "exp", "jti"];

/// Flat string-to-string claims protected by a token signature
///
/// The generator treats claims as opaque payload: it checks only that the
/// mapping is non-empty and free of reserved names, and hands back exactly
/// what it signed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(HashMap<String, String>);

impl Claims {
    /// Creates an empty claims mapping
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Inserts a claim, returning the previous value if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the claim value, failing with `ClaimMissing` when the claim is
    /// absent or empty
    pub fn require(&self, key: &str) -> Result<&str, TokenError> {
        match self.get(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(TokenError::claim_missing(key)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Checks that these claims can be signed
    pub(crate) fn check_signable(&self) -> Result<(), TokenError> {
        if self.is_empty() {
            return Err(TokenError::InvalidClaims {
                reason: "claims must not be empty".to_string(),
            });
        }
        if let Some(reserved) = RESERVED_CLAIMS.iter().find(|name| self.0.contains_key(**name)) {
            return Err(TokenError::InvalidClaims {
                reason: format!("claim '{}' is reserved", reserved),
            });
        }
        Ok(())
    }

    pub(crate) fn as_map(&self) -> &HashMap<String, String> {
        &self.0
    }

    pub(crate) fn from_map(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K, V> FromIterator<(K, V)> for Claims
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// JWT body: caller claims flattened next to the registered timing claims
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TokenPayload {
    #[serde(flatten)]
    pub claims: HashMap<String, String>,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
}
