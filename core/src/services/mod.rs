//! Business services containing domain logic and use cases.

pub mod one_time_code;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use one_time_code::{LoginCodeStore, OneTimeCodeStore, RedirectCodeStore};
pub use session::SessionBridge;
pub use token::{
    Clock, ManualClock, Rs256KeyPair, SystemClock, TokenClassSettings, TokenGenerator,
    TokenService, TokenServiceConfig,
};
