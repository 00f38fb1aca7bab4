//! Shared utilities and common types for the credential broker
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types for token classes, one-time codes, cache and server
//! - Log masking helpers for secrets (codes, tokens, identities)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, LogFormat,
    TokenConfig, TokenClassConfig, CodeConfig, OneTimeCodeConfig, CodeBackendKind,
    CacheConfig, ServerConfig,
};
pub use utils::mask;
