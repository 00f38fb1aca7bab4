//! RSA key fixtures and service builders shared by token-related tests

use std::sync::Arc;

use crate::domain::entities::TokenClass;
use crate::services::token::{
    ManualClock, Rs256KeyPair, TokenClassSettings, TokenService, TokenServiceConfig,
};

pub(crate) const ACCESS_PRIVATE_PEM: &str =
    include_str!("../../../../keys/test/access_private.pem");
pub(crate) const ACCESS_PUBLIC_PEM: &str =
    include_str!("../../../../keys/test/access_public.pem");
pub(crate) const REFRESH_PRIVATE_PEM: &str =
    include_str!("../../../../keys/test/refresh_private.pem");
pub(crate) const REFRESH_PUBLIC_PEM: &str =
    include_str!("../../../../keys/test/refresh_public.pem");
pub(crate) const EMAIL_VERIFICATION_PRIVATE_PEM: &str =
    include_str!("../../../../keys/test/email_verification_private.pem");
pub(crate) const EMAIL_VERIFICATION_PUBLIC_PEM: &str =
    include_str!("../../../../keys/test/email_verification_public.pem");

pub(crate) const ACCESS_TTL: i64 = 900;
pub(crate) const REFRESH_TTL: i64 = 604_800;
pub(crate) const EMAIL_VERIFICATION_TTL: i64 = 86_400;
pub(crate) const CLOCK_SKEW: i64 = 30;

/// Fixed starting point for manual clocks (2024-01-01T00:00:00Z)
pub(crate) const T0: i64 = 1_704_067_200;

pub(crate) fn keypair(class: TokenClass) -> Rs256KeyPair {
    let (private, public) = match class {
        TokenClass::Access => (ACCESS_PRIVATE_PEM, ACCESS_PUBLIC_PEM),
        TokenClass::Refresh => (REFRESH_PRIVATE_PEM, REFRESH_PUBLIC_PEM),
        TokenClass::EmailVerification => {
            (EMAIL_VERIFICATION_PRIVATE_PEM, EMAIL_VERIFICATION_PUBLIC_PEM)
        }
    };
    Rs256KeyPair::from_pem_strings(Some(private), public).unwrap()
}

pub(crate) fn service_config() -> TokenServiceConfig {
    TokenServiceConfig {
        access: TokenClassSettings::new(keypair(TokenClass::Access), ACCESS_TTL),
        refresh: TokenClassSettings::new(keypair(TokenClass::Refresh), REFRESH_TTL),
        email_verification: TokenClassSettings::new(
            keypair(TokenClass::EmailVerification),
            EMAIL_VERIFICATION_TTL,
        ),
        clock_skew_seconds: CLOCK_SKEW,
    }
}

/// Token service driven by a manual clock starting at [`T0`]
pub(crate) fn service_with_clock() -> (TokenService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(T0));
    let service = TokenService::with_clock(service_config(), clock.clone()).unwrap();
    (service, clock)
}
