use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use tracing::{error, warn};
use validator::ValidationErrors;

use cb_core::errors::{DomainError, TokenError};

use crate::dto::ErrorResponse;

/// Maps a domain error onto an HTTP response
///
/// Rejected credentials become 401 without naming the reason. Everything the
/// caller cannot fix is an opaque 500.
pub fn handle_domain_error(err: DomainError) -> HttpResponse {
    match err {
        DomainError::Validation { message } => {
            ErrorResponse::new("validation_error", message).to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Token(TokenError::InvalidClaims { reason }) => {
            ErrorResponse::new("validation_error", reason).to_response(StatusCode::BAD_REQUEST)
        }
        DomainError::Token(token_err) if token_err.is_rejection() => {
            ErrorResponse::new("invalid_token", "The presented token is not valid")
                .to_response(StatusCode::UNAUTHORIZED)
        }
        other => {
            error!("API Error: {}", other);
            ErrorResponse::new("internal_error", "An internal error occurred")
                .to_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// 400 response listing field validation failures
pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    ErrorResponse::new("validation_error", "Invalid request data")
        .with_detail("validation_errors", serde_json::json!(errors))
        .to_response(StatusCode::BAD_REQUEST)
}

/// Turns JSON body extraction failures into the standard error body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body: {}", err);
    let response = ErrorResponse::new("invalid_request", "Request body is not valid JSON for this endpoint")
        .to_response(StatusCode::BAD_REQUEST);
    actix_web::error::InternalError::from_response(err, response).into()
}
