//! HTTP tests for login code endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use cb_api::app::create_app;
use cb_api::dto::code_dto::{IssueCodeResponse, ValidateCodeResponse};

#[actix_web::test]
async fn test_code_is_bound_to_identity_and_single_use() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/codes")
        .set_json(json!({ "identity": "u-42" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued: IssueCodeResponse = test::read_body_json(resp).await;
    assert_eq!(issued.expires_in, 300);
    assert!(!issued.code.is_empty());

    let attempts = [("u-99", false), ("u-42", true), ("u-42", false)];
    for (identity, expected) in attempts {
        let req = test::TestRequest::post()
            .uri("/api/v1/codes/validate")
            .set_json(json!({ "identity": identity, "code": issued.code }))
            .to_request();
        let body: ValidateCodeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.valid, expected, "identity {}", identity);
    }
}

#[actix_web::test]
async fn test_unknown_code_is_invalid() {
    let app = test::init_service(create_app(common::app_state())).await;

    for code in ["", "nope", "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/codes/validate")
            .set_json(json!({ "identity": "u-42", "code": code }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ValidateCodeResponse = test::read_body_json(resp).await;
        assert!(!body.valid);
    }
}

#[actix_web::test]
async fn test_empty_identity_is_bad_request() {
    let app = test::init_service(create_app(common::app_state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/codes")
        .set_json(json!({ "identity": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
