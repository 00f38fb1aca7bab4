//! Value objects representing immutable domain concepts.

pub mod token_pair;
pub mod verification;

// Re-export commonly used types
pub use token_pair::TokenPair;
pub use verification::{EmailVerificationClaims, TokenVerification};
