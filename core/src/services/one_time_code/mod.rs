//! One-time code store
//!
//! Opaque random codes mapped to a payload for a bounded lifetime and
//! consumed exactly once. Instantiated once for login identities and once
//! for redirect token pairs, each under its own key prefix.

mod service;


pub use service::{LoginCodeStore, OneTimeCodeStore, RedirectCodeStore, MAX_CODE_TTL_SECONDS};
