use actix_web::{http::StatusCode, web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::session_dto::{
    ExchangeCodeRequest, RedirectCodeRequest, RedirectCodeResponse, RefreshSessionRequest,
    TokenPairResponse,
};
use crate::dto::token_dto::TokenResponse;
use crate::dto::ErrorResponse;
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/sessions/redirect-code
///
/// Mints a token pair for `user_id` and parks it behind a short-lived code
/// that the client carries across a redirect.
pub async fn issue_redirect_code(
    state: web::Data<AppState>,
    request: web::Json<RedirectCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.sessions.issue_redirect_code(&request.user_id).await {
        Ok(code) => HttpResponse::Ok().json(RedirectCodeResponse {
            code,
            expires_in: state.redirect_code_ttl,
        }),
        Err(err) => handle_domain_error(err),
    }
}

/// Handler for POST /api/v1/sessions/exchange
///
/// ## Errors
/// - 404 Not Found: Code unknown, expired or already exchanged
pub async fn exchange_redirect_code(
    state: web::Data<AppState>,
    request: web::Json<ExchangeCodeRequest>,
) -> HttpResponse {
    match state.sessions.exchange_redirect_code(&request.code).await {
        Ok(Some(pair)) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Ok(None) => ErrorResponse::new("code_not_found", "Code is unknown, expired or already used")
            .to_response(StatusCode::NOT_FOUND),
        Err(err) => handle_domain_error(err),
    }
}

/// Handler for POST /api/v1/sessions/refresh
///
/// ## Errors
/// - 401 Unauthorized: Refresh token rejected
pub async fn refresh_session(
    state: web::Data<AppState>,
    request: web::Json<RefreshSessionRequest>,
) -> HttpResponse {
    match state.sessions.refresh_session(&request.refresh_token) {
        Ok(signed) => HttpResponse::Ok().json(TokenResponse::from(signed)),
        Err(err) => handle_domain_error(err),
    }
}
