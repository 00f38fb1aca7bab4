//! Domain-specific error types and error handling.

mod types;


pub use types::TokenError;

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Code store error: {message}")]
    Store { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether the error should be reported to clients as a rejected
    /// credential rather than a server fault
    pub fn is_rejection(&self) -> bool {
        matches!(self, DomainError::Token(err) if err.is_rejection())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
