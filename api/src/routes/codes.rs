use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::code_dto::{
    IssueCodeRequest, IssueCodeResponse, ValidateCodeRequest, ValidateCodeResponse,
};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/codes
///
/// Issues a single-use login code bound to `identity`.
///
/// ## Errors
/// - 400 Bad Request: Missing or empty identity
/// - 500 Internal Server Error: Code store unavailable
pub async fn issue_code(
    state: web::Data<AppState>,
    request: web::Json<IssueCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state.login_codes.issue_code(&request.identity).await {
        Ok(code) => HttpResponse::Ok().json(IssueCodeResponse {
            code,
            expires_in: state.login_codes.config().ttl_seconds,
        }),
        Err(err) => handle_domain_error(err),
    }
}

/// Handler for POST /api/v1/codes/validate
///
/// Consumes the code when it matches `identity`. Unknown, expired, reused
/// and mismatched codes all answer `{"valid": false}`.
pub async fn validate_code(
    state: web::Data<AppState>,
    request: web::Json<ValidateCodeRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .login_codes
        .validate_code(&request.identity, &request.code)
        .await
    {
        Ok(valid) => HttpResponse::Ok().json(ValidateCodeResponse { valid }),
        Err(err) => handle_domain_error(err),
    }
}
