//! # Credential Broker Core
//!
//! Domain layer for credential token issuance and one-time code exchange.
//! This crate contains the token entities and error types, the per-class
//! token generators behind the token service facade, the one-time code store
//! and its backend trait, and the session bridge that ties login tokens to
//! redirect codes.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
