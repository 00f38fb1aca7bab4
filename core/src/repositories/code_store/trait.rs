//! Code store backend trait defining the key-value primitives behind
//! one-time codes.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Outcome of an atomic compare-and-delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeCheck {
    /// Stored value matched and the key was deleted
    Matched,
    /// A live value exists but differs; the key is left untouched
    Mismatched,
    /// Key absent or expired
    Missing,
}

impl CodeCheck {
    pub fn is_matched(&self) -> bool {
        matches!(self, CodeCheck::Matched)
    }
}

/// Ephemeral TTL-backed key-value store
///
/// Every method is a single atomic operation on the backend. Single-use
/// redemption depends on `compare_and_delete` and `get_and_delete` being
/// atomic with respect to concurrent callers on the same key; implementations
/// must never emulate them with a separate read followed by a delete.
///
/// Failures surface as `DomainError::Store`.
#[async_trait]
pub trait CodeStoreBackend: Send + Sync {
    /// Stores `value` under `key` for `ttl_seconds` unless the key already
    /// holds a live value
    ///
    /// # Returns
    /// * `Ok(true)` - Value stored
    /// * `Ok(false)` - Key already present, nothing written
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<bool, DomainError>;

    /// Deletes `key` only if its live value equals `expected`
    ///
    /// A mismatching value is never deleted.
    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<CodeCheck, DomainError>;

    /// Removes `key` and returns the live value it held, if any
    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Deletes `key`, returning whether a live value was removed
    async fn delete(&self, key: &str) -> Result<bool, DomainError>;

    /// Remaining lifetime of `key` in seconds, `None` if absent
    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError>;
}
