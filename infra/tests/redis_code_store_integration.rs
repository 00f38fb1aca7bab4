//! Integration tests for the Redis one-time code store
//!
//! These tests require a running Redis instance to execute.
//! Run with: cargo test -p cb_infra --test redis_code_store_integration -- --ignored

use std::sync::Arc;

use cb_core::repositories::code_store::{CodeCheck, CodeStoreBackend};
use cb_core::services::{LoginCodeStore, RedirectCodeStore};
use cb_core::domain::value_objects::TokenPair;
use cb_infra::cache::{CacheConfig, RedisClient, RedisCodeStore};
use cb_shared::config::OneTimeCodeConfig;
use tokio::sync::Barrier;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn connect() -> RedisCodeStore {
    init_tracing();
    let config = CacheConfig::new(
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
    );
    let client = RedisClient::new(config).await.unwrap();
    assert!(client.health_check().await.unwrap());
    RedisCodeStore::new(client)
}

/// Prefix unique to one test run so parallel runs never share keys
fn test_prefix(name: &str) -> String {
    format!("test:{}:{}:", name, std::process::id())
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_backend_primitives() {
    let store = connect().await;
    let key = format!("{}k", test_prefix("primitives"));
    store.delete(&key).await.unwrap();

    assert!(store.set_if_absent(&key, "alice", 60).await.unwrap());
    assert!(!store.set_if_absent(&key, "bob", 60).await.unwrap());

    let ttl = store.ttl(&key).await.unwrap().unwrap();
    assert!(ttl > 0 && ttl <= 60);

    assert_eq!(store.compare_and_delete(&key, "bob").await.unwrap(), CodeCheck::Mismatched);
    assert_eq!(store.compare_and_delete(&key, "alice").await.unwrap(), CodeCheck::Matched);
    assert_eq!(store.compare_and_delete(&key, "alice").await.unwrap(), CodeCheck::Missing);

    assert!(store.set_if_absent(&key, "carol", 60).await.unwrap());
    assert_eq!(store.get_and_delete(&key).await.unwrap().as_deref(), Some("carol"));
    assert_eq!(store.get_and_delete(&key).await.unwrap(), None);
    assert!(!store.delete(&key).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Redis server
async fn test_login_code_scenario() {
    let backend: Arc<dyn CodeStoreBackend> = Arc::new(connect().await);
    let store = LoginCodeStore::new(
        backend,
        OneTimeCodeConfig::new(test_prefix("login"), 300),
    )
    .unwrap();

    let code = store.issue_code(&"u-42".to_string()).await.unwrap();
    assert!(!store.validate_code(&"u-99".to_string(), &code).await.unwrap());
    assert!(store.validate_code(&"u-42".to_string(), &code).await.unwrap());
    assert!(!store.validate_code(&"u-42".to_string(), &code).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore] // Requires Redis server
async fn test_concurrent_redemption_against_redis() {
    const CONTENDERS: usize = 32;

    let backend: Arc<dyn CodeStoreBackend> = Arc::new(connect().await);
    let store = Arc::new(
        RedirectCodeStore::new(backend, OneTimeCodeConfig::new(test_prefix("redirect"), 60))
            .unwrap(),
    );
    let pair = TokenPair {
        access_token: "a".to_string(),
        access_expires_at: 1,
        refresh_token: "r".to_string(),
        refresh_expires_at: 2,
    };
    let code = store.issue_code(&pair).await.unwrap();
    let barrier = Arc::new(Barrier::new(CONTENDERS));

    let handles: Vec<_> = (0..CONTENDERS)
        .map(|_| {
            let store = store.clone();
            let code = code.clone();
            let barrier = barrier.clone();
            tokio::spawn(async move {
                barrier.wait().await;
                store.redeem_code(&code).await.unwrap()
            })
        })
        .collect();

    let mut redeemed = 0;
    for handle in handles {
        if handle.await.unwrap().is_some() {
            redeemed += 1;
        }
    }
    assert_eq!(redeemed, 1);
}
