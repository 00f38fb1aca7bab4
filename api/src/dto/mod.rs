//! Request and response bodies of the HTTP API

pub mod code_dto;
pub mod error;
pub mod session_dto;
pub mod token_dto;

pub use error::ErrorResponse;
