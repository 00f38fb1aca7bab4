//! # Infrastructure Layer
//!
//! Concrete implementations of the storage seams declared by `cb_core`.
//!
//! - **Cache**: Redis client and the Redis-backed one-time code store, whose
//!   single-use guarantees rest on server-side Lua scripts

// Re-export core types for convenience
pub use cb_core::errors::*;

/// Cache module - Redis client and code store backend
pub mod cache;

use cb_core::errors::DomainError;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            InfrastructureError::Cache(e) => DomainError::Store {
                message: e.to_string(),
            },
        }
    }
}
