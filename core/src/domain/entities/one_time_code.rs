//! One-time code entity for single-use, short-lived exchanges.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::domain::value_objects::TokenPair;
use crate::errors::{DomainError, DomainResult};

/// Smallest accepted code size (128 bits of entropy)
pub const MIN_CODE_BYTES: usize = 16;

/// Opaque random code generator and shape checks
///
/// Codes are raw bytes from the operating system CSPRNG encoded as unpadded
/// base64url, so they are safe to place in URLs and store keys.
pub struct OneTimeCode;

impl OneTimeCode {
    /// Generates a new code from `byte_len` random bytes
    pub fn generate(byte_len: usize) -> String {
        let mut bytes = vec![0u8; byte_len];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(&bytes)
    }

    /// Length in characters of a code made from `byte_len` bytes
    pub fn encoded_len(byte_len: usize) -> usize {
        (byte_len * 4 + 2) / 3
    }

    /// Checks that a presented code could have been issued with `byte_len`
    /// bytes: correct length and base64url alphabet only
    pub fn is_well_formed(code: &str, byte_len: usize) -> bool {
        code.len() == Self::encoded_len(byte_len)
            && code
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    }
}

/// Value stored behind a one-time code
///
/// The encoded form is what the store holds and what identity comparison
/// runs against, so `encode` must be deterministic.
pub trait CodePayload: Sized + Send + Sync {
    fn encode(&self) -> DomainResult<String>;
    fn decode(raw: &str) -> DomainResult<Self>;
}

impl CodePayload for String {
    fn encode(&self) -> DomainResult<String> {
        Ok(self.clone())
    }

    fn decode(raw: &str) -> DomainResult<Self> {
        Ok(raw.to_string())
    }
}

impl CodePayload for TokenPair {
    fn encode(&self) -> DomainResult<String> {
        serde_json::to_string(self).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize token pair: {}", e),
        })
    }

    fn decode(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw).map_err(|e| DomainError::Internal {
            message: format!("Failed to deserialize token pair: {}", e),
        })
    }
}
