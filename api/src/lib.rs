//! HTTP surface of the credential broker
//!
//! Exposes token generation and verification per class, login code
//! issuance and validation, and the redirect code session bridge.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod telemetry;
