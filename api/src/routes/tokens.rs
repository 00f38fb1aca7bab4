use actix_web::{web, HttpResponse};
use validator::Validate;

use cb_core::domain::value_objects::TokenVerification;
use cb_core::errors::DomainError;

use crate::app::AppState;
use crate::dto::token_dto::{
    GenerateEmailVerificationTokenRequest, GenerateTokenRequest, TokenResponse,
    VerifyEmailVerificationTokenResponse, VerifyTokenRequest, VerifyTokenResponse,
};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/tokens/access
///
/// # Request Body
///
/// ```json
/// { "user_id": "11111111-1111-1111-1111-111111111111" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "token": "eyJ...", "expires_at": 1704068100 }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Missing or empty user id
/// - 500 Internal Server Error: Signing key unavailable or signing failed
pub async fn generate_access_token(
    state: web::Data<AppState>,
    request: web::Json<GenerateTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.tokens.generate_access_token(&request.user_id) {
        Ok(signed) => HttpResponse::Ok().json(TokenResponse::from(signed)),
        Err(err) => handle_domain_error(DomainError::from(err)),
    }
}

/// Handler for POST /api/v1/tokens/access/verify
///
/// Always answers 200; a rejected token yields `{"valid": false}` with no
/// reason attached.
pub async fn verify_access_token(
    state: web::Data<AppState>,
    request: web::Json<VerifyTokenRequest>,
) -> HttpResponse {
    let verification: TokenVerification<String> =
        state.tokens.verify_access_token(&request.token).into();
    HttpResponse::Ok().json(VerifyTokenResponse::from(verification))
}

/// Handler for POST /api/v1/tokens/refresh
pub async fn generate_refresh_token(
    state: web::Data<AppState>,
    request: web::Json<GenerateTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.tokens.generate_refresh_token(&request.user_id) {
        Ok(signed) => HttpResponse::Ok().json(TokenResponse::from(signed)),
        Err(err) => handle_domain_error(DomainError::from(err)),
    }
}

/// Handler for POST /api/v1/tokens/refresh/verify
pub async fn verify_refresh_token(
    state: web::Data<AppState>,
    request: web::Json<VerifyTokenRequest>,
) -> HttpResponse {
    let verification: TokenVerification<String> =
        state.tokens.verify_refresh_token(&request.token).into();
    HttpResponse::Ok().json(VerifyTokenResponse::from(verification))
}

/// Handler for POST /api/v1/tokens/email-verification
///
/// # Request Body
///
/// ```json
/// { "user_id": "11111111-...", "email": "a@b.com", "code": "654321" }
/// ```
pub async fn generate_email_verification_token(
    state: web::Data<AppState>,
    request: web::Json<GenerateEmailVerificationTokenRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .tokens
        .generate_email_verification_token(&request.user_id, &request.email, &request.code)
    {
        Ok(signed) => HttpResponse::Ok().json(TokenResponse::from(signed)),
        Err(err) => handle_domain_error(DomainError::from(err)),
    }
}

/// Handler for POST /api/v1/tokens/email-verification/verify
pub async fn verify_email_verification_token(
    state: web::Data<AppState>,
    request: web::Json<VerifyTokenRequest>,
) -> HttpResponse {
    let verification: TokenVerification<_> = state
        .tokens
        .verify_email_verification_token(&request.token)
        .into();
    HttpResponse::Ok().json(VerifyEmailVerificationTokenResponse::from(verification))
}
