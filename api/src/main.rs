use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use cb_api::app::{create_app, AppState};
use cb_api::config::load_config;
use cb_api::telemetry::init_tracing;
use cb_core::repositories::{CodeStoreBackend, InMemoryCodeStore};
use cb_core::services::TokenService;
use cb_infra::cache::{RedisClient, RedisCodeStore};
use cb_shared::config::{AppConfig, CodeBackendKind};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let loaded = load_config();
    let config = loaded.config;
    init_tracing(&config.logging)?;

    if let Some(path) = &loaded.dotenv_path {
        info!("Loaded environment overrides from {}", path.display());
    }

    info!(
        environment = ?config.environment,
        backend = ?config.codes.backend,
        "Starting credential broker"
    );

    let tokens = Arc::new(
        TokenService::from_config(&config.tokens).context("failed to load token keys")?,
    );
    let backend = code_store_backend(&config).await?;
    let state = web::Data::new(
        AppState::new(tokens, backend, &config.codes).context("invalid code store configuration")?,
    );

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")
}

async fn code_store_backend(config: &AppConfig) -> anyhow::Result<Arc<dyn CodeStoreBackend>> {
    match config.codes.backend {
        CodeBackendKind::Redis => {
            let client = RedisClient::new(config.cache.clone())
                .await
                .context("failed to connect to Redis")?;
            Ok(Arc::new(RedisCodeStore::new(client)))
        }
        CodeBackendKind::Memory => {
            if config.environment.is_production() {
                tracing::warn!("In-memory code store in production; codes are not shared between instances");
            }
            Ok(Arc::new(InMemoryCodeStore::new()))
        }
    }
}
