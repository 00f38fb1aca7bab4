//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{http::StatusCode, middleware::Logger, web, App, HttpResponse};

use cb_core::errors::DomainResult;
use cb_core::repositories::CodeStoreBackend;
use cb_core::services::{LoginCodeStore, RedirectCodeStore, SessionBridge, TokenService};
use cb_shared::config::CodeConfig;

use crate::dto::ErrorResponse;
use crate::handlers::json_error_handler;
use crate::routes;

/// Services shared by every worker
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub login_codes: Arc<LoginCodeStore>,
    pub sessions: Arc<SessionBridge>,
    /// Lifetime of redirect codes, echoed back to clients
    pub redirect_code_ttl: u64,
}

impl AppState {
    /// Builds both code stores over one backend and wires the session bridge
    pub fn new(
        tokens: Arc<TokenService>,
        backend: Arc<dyn CodeStoreBackend>,
        codes: &CodeConfig,
    ) -> DomainResult<Self> {
        let login_codes = Arc::new(LoginCodeStore::new(backend.clone(), codes.login.clone())?);
        let redirect_codes = Arc::new(RedirectCodeStore::new(backend, codes.redirect.clone())?);
        let sessions = Arc::new(SessionBridge::new(tokens.clone(), redirect_codes));

        Ok(Self {
            tokens,
            login_codes,
            sessions,
            redirect_code_ttl: codes.redirect.ttl_seconds,
        })
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            impl actix_web::body::MessageBody,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(routes::configure))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "credential-broker",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new("not_found", "The requested resource was not found")
        .to_response(StatusCode::NOT_FOUND)
}
