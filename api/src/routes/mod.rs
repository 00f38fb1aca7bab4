//! HTTP route handlers
//!
//! - `tokens` - Generation and verification per token class
//! - `codes` - Login code issuance and validation
//! - `sessions` - Redirect code bridging and access token refresh

pub mod codes;
pub mod sessions;
pub mod tokens;

use actix_web::web;

/// Registers every `/api/v1` route
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tokens")
            .route("/access", web::post().to(tokens::generate_access_token))
            .route("/access/verify", web::post().to(tokens::verify_access_token))
            .route("/refresh", web::post().to(tokens::generate_refresh_token))
            .route("/refresh/verify", web::post().to(tokens::verify_refresh_token))
            .route(
                "/email-verification",
                web::post().to(tokens::generate_email_verification_token),
            )
            .route(
                "/email-verification/verify",
                web::post().to(tokens::verify_email_verification_token),
            ),
    )
    .service(
        web::scope("/codes")
            .route("", web::post().to(codes::issue_code))
            .route("/validate", web::post().to(codes::validate_code)),
    )
    .service(
        web::scope("/sessions")
            .route("/redirect-code", web::post().to(sessions::issue_redirect_code))
            .route("/exchange", web::post().to(sessions::exchange_redirect_code))
            .route("/refresh", web::post().to(sessions::refresh_session)),
    );
}
