//! Redis-backed one-time code store
//!
//! Each trait method maps to a single Redis command or script, so a call
//! either happens entirely on the server or not at all.

use async_trait::async_trait;
use tracing::warn;

use cb_core::errors::DomainError;
use cb_core::repositories::code_store::{CodeCheck, CodeStoreBackend};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// `CodeStoreBackend` over a shared Redis connection
#[derive(Clone)]
pub struct RedisCodeStore {
    client: RedisClient,
}

impl RedisCodeStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

/// Maps the compare-and-delete script reply onto a `CodeCheck`
pub(crate) fn code_check_from_reply(reply: i64) -> Result<CodeCheck, DomainError> {
    match reply {
        1 => Ok(CodeCheck::Matched),
        0 => Ok(CodeCheck::Mismatched),
        -1 => Ok(CodeCheck::Missing),
        other => {
            warn!("Unexpected compare-and-delete reply: {}", other);
            Err(DomainError::Store {
                message: format!("unexpected compare-and-delete reply {}", other),
            })
        }
    }
}

fn store_error(err: InfrastructureError) -> DomainError {
    DomainError::from(err)
}

#[async_trait]
impl CodeStoreBackend for RedisCodeStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<bool, DomainError> {
        self.client
            .set_nx_ex(key, value, ttl_seconds)
            .await
            .map_err(store_error)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<CodeCheck, DomainError> {
        let reply = self
            .client
            .compare_and_delete(key, expected)
            .await
            .map_err(store_error)?;
        code_check_from_reply(reply)
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, DomainError> {
        self.client.get_and_delete(key).await.map_err(store_error)
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        self.client.delete(key).await.map_err(store_error)
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        self.client.ttl(key).await.map_err(store_error)
    }
}
