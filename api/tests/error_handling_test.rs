//! Status mapping for domain errors

use actix_web::http::StatusCode;

use cb_api::handlers::handle_domain_error;
use cb_core::errors::{DomainError, TokenError};

#[test]
fn test_rejections_map_to_unauthorized() {
    for err in [
        TokenError::Malformed,
        TokenError::SignatureInvalid,
        TokenError::Expired,
        TokenError::NotYetValid,
        TokenError::claim_missing("sub"),
    ] {
        let response = handle_domain_error(DomainError::Token(err));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[test]
fn test_invalid_input_maps_to_bad_request() {
    let response = handle_domain_error(DomainError::Validation {
        message: "user id must not be empty".to_string(),
    });
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = handle_domain_error(DomainError::Token(TokenError::InvalidClaims {
        reason: "empty email".to_string(),
    }));
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_server_faults_map_to_internal_error() {
    for err in [
        DomainError::Store { message: "timeout".to_string() },
        DomainError::Configuration { message: "bad key".to_string() },
        DomainError::Token(TokenError::KeyUnavailable),
        DomainError::Token(TokenError::SigningFailed),
    ] {
        let response = handle_domain_error(err);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
