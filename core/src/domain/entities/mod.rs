//! Domain entities representing signed tokens, their claims and one-time codes.

pub mod claims;
pub mod one_time_code;
pub mod token;


// Re-export commonly used types
pub use claims::{Claims, RESERVED_CLAIMS};
pub use one_time_code::{CodePayload, OneTimeCode, MIN_CODE_BYTES};
pub use token::{
    SignedToken, TokenClass, CLAIM_CODE, CLAIM_EMAIL, CLAIM_SUBJECT,
};
