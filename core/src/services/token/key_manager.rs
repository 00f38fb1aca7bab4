//! RS256 key management for JWT signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{json, Value};

use crate::errors::{DomainError, DomainResult};

/// RSA keypair of a single token class
///
/// The private half is optional: a verification-only keypair can check
/// tokens but every attempt to mint one fails with `KeyUnavailable`.
#[derive(Clone)]
pub struct Rs256KeyPair {
    /// Private key for signing JWTs
    encoding_key: Option<EncodingKey>,
    /// Public key for verifying JWTs
    decoding_key: DecodingKey,
    /// Normalized public key PEM, used to detect keys shared across classes
    public_pem: String,
    /// Where the keys came from, for diagnostics
    source: PathBuf,
}

impl std::fmt::Debug for Rs256KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyPair")
            .field("source", &self.source)
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

impl Rs256KeyPair {
    /// Loads a keypair from PEM files
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - PEM-encoded RSA private key, or `None` for a
    ///   verification-only keypair
    /// * `public_key_path` - PEM-encoded RSA public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyPair)` - Keys loaded and parsed
    /// * `Err(DomainError::Configuration)` - A file is unreadable or not a valid key
    pub fn from_files(
        private_key_path: Option<&Path>,
        public_key_path: &Path,
    ) -> DomainResult<Self> {
        let private_pem = private_key_path
            .map(|path| {
                fs::read_to_string(path).map_err(|e| DomainError::Configuration {
                    message: format!("Failed to read private key {}: {}", path.display(), e),
                })
            })
            .transpose()?;

        let public_pem = fs::read_to_string(public_key_path).map_err(|e| {
            DomainError::Configuration {
                message: format!(
                    "Failed to read public key {}: {}",
                    public_key_path.display(),
                    e
                ),
            }
        })?;

        let mut pair = Self::from_pem_strings(private_pem.as_deref(), &public_pem)?;
        pair.source = public_key_path.to_path_buf();
        Ok(pair)
    }

    /// Creates a keypair from PEM strings (useful for testing or embedded keys)
    pub fn from_pem_strings(private_key_pem: Option<&str>, public_key_pem: &str) -> DomainResult<Self> {
        let encoding_key = private_key_pem
            .map(|pem| {
                EncodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| DomainError::Configuration {
                    message: format!("Invalid private key format: {}", e),
                })
            })
            .transpose()?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes()).map_err(|e| {
            DomainError::Configuration {
                message: format!("Invalid public key format: {}", e),
            }
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            public_pem: public_key_pem.trim().to_string(),
            source: PathBuf::from("memory"),
        })
    }

    /// Drops the private half, leaving a verification-only keypair
    pub fn verification_only(mut self) -> Self {
        self.encoding_key = None;
        self
    }

    /// Returns the encoding key for signing JWTs, if present
    pub fn encoding_key(&self) -> Option<&EncodingKey> {
        self.encoding_key.as_ref()
    }

    /// Returns the decoding key for verifying JWTs
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn can_sign(&self) -> bool {
        self.encoding_key.is_some()
    }

    /// Whether two keypairs verify with the same public key
    pub fn shares_public_key(&self, other: &Rs256KeyPair) -> bool {
        self.public_pem == other.public_pem
    }

    /// Signs a throwaway token and verifies it with the public half
    ///
    /// Catches a private key paired with the wrong public key, which would
    /// otherwise mint tokens that fail their own verification. Keypairs
    /// without a private half pass trivially.
    pub fn check_pair(&self) -> DomainResult<()> {
        let Some(encoding_key) = self.encoding_key.as_ref() else {
            return Ok(());
        };

        let mismatch = |detail: String| DomainError::Configuration {
            message: format!(
                "Private and public keys from {} do not form a pair: {}",
                self.source.display(),
                detail
            ),
        };

        let token = encode(&Header::new(Algorithm::RS256), &json!({ "chk": "pair" }), encoding_key)
            .map_err(|e| mismatch(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        decode::<Value>(&token, &self.decoding_key, &validation)
            .map(|_| ())
            .map_err(|e| mismatch(e.to_string()))
    }
}
