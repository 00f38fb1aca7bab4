//! Shared fixtures for HTTP tests

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;

use cb_api::app::AppState;
use cb_core::repositories::{CodeStoreBackend, InMemoryCodeStore};
use cb_core::services::TokenService;
use cb_shared::config::{CodeBackendKind, CodeConfig, TokenClassConfig, TokenConfig};

fn key_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../core/keys/test")
        .join(name)
}

fn class_config(class: &str, ttl_seconds: i64) -> TokenClassConfig {
    TokenClassConfig::new(
        key_path(&format!("{}_private.pem", class)),
        key_path(&format!("{}_public.pem", class)),
        ttl_seconds,
    )
}

pub fn token_config() -> TokenConfig {
    TokenConfig {
        access: class_config("access", 900),
        refresh: class_config("refresh", 604_800),
        email_verification: class_config("email_verification", 86_400),
        clock_skew_seconds: 30,
    }
}

/// App state over real test keys and an in-memory code store
pub fn app_state() -> web::Data<AppState> {
    let tokens = Arc::new(TokenService::from_config(&token_config()).unwrap());
    let backend: Arc<dyn CodeStoreBackend> = Arc::new(InMemoryCodeStore::new());
    let codes = CodeConfig {
        backend: CodeBackendKind::Memory,
        ..CodeConfig::default()
    };
    web::Data::new(AppState::new(tokens, backend, &codes).unwrap())
}
