//! Token service module for JWT management
//!
//! This module handles all token-related operations:
//! - RS256 key loading, one keypair per token class
//! - A generic token generator bound to one keypair and lifetime
//! - The token service facade over the access, refresh and email
//!   verification generators

mod clock;
mod config;
mod generator;
mod key_manager;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TokenClassSettings, TokenServiceConfig, MAX_TOKEN_TTL_SECONDS};
pub use generator::TokenGenerator;
pub use key_manager::Rs256KeyPair;
pub use service::TokenService;
