//! HTTP tests for token generation and verification endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use cb_api::app::create_app;
use cb_api::dto::token_dto::{TokenResponse, VerifyEmailVerificationTokenResponse, VerifyTokenResponse};
use cb_api::dto::ErrorResponse;

const USER_ID: &str = "11111111-1111-1111-1111-111111111111";

#[actix_web::test]
async fn test_access_token_round_trip() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/access")
        .set_json(json!({ "user_id": USER_ID }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued: TokenResponse = test::read_body_json(resp).await;
    assert_eq!(issued.token.split('.').count(), 3);
    assert!(issued.expires_at > chrono::Utc::now().timestamp());

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/access/verify")
        .set_json(json!({ "token": issued.token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let verified: VerifyTokenResponse = test::read_body_json(resp).await;
    assert!(verified.valid);
    assert_eq!(verified.user_id.as_deref(), Some(USER_ID));
}

#[actix_web::test]
async fn test_refresh_token_rejected_by_access_verifier() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/refresh")
        .set_json(json!({ "user_id": USER_ID }))
        .to_request();
    let issued: TokenResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/access/verify")
        .set_json(json!({ "token": issued.token }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "valid": false }));

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/refresh/verify")
        .set_json(json!({ "token": issued.token }))
        .to_request();
    let verified: VerifyTokenResponse = test::call_and_read_body_json(&app, req).await;
    assert!(verified.valid);
}

#[actix_web::test]
async fn test_garbage_token_reports_invalid_without_reason() {
    let app = test::init_service(create_app(common::app_state())).await;

    for token in ["", "not-a-jwt", "a.b.c"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/tokens/access/verify")
            .set_json(json!({ "token": token }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "valid": false }), "token {:?}", token);
    }
}

#[actix_web::test]
async fn test_email_verification_token_carries_claims() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/email-verification")
        .set_json(json!({ "user_id": USER_ID, "email": "a@b.com", "code": "654321" }))
        .to_request();
    let issued: TokenResponse = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/email-verification/verify")
        .set_json(json!({ "token": issued.token }))
        .to_request();
    let verified: VerifyEmailVerificationTokenResponse =
        test::call_and_read_body_json(&app, req).await;
    assert!(verified.valid);
    assert_eq!(verified.user_id.as_deref(), Some(USER_ID));
    assert_eq!(verified.email.as_deref(), Some("a@b.com"));
    assert_eq!(verified.code.as_deref(), Some("654321"));
}

#[actix_web::test]
async fn test_empty_user_id_is_bad_request() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/access")
        .set_json(json!({ "user_id": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "validation_error");
}

#[actix_web::test]
async fn test_invalid_email_is_bad_request() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/email-verification")
        .set_json(json!({ "user_id": USER_ID, "email": "not-an-email", "code": "654321" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tokens/access")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"user\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "invalid_request");
}

#[actix_web::test]
async fn test_health_and_not_found() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "not_found");
}
