//! Redis cache client implementation
//!
//! Provides a Redis client over a multiplexed connection with the primitives
//! the one-time code store needs: set-if-absent with expiry, atomic
//! compare-and-delete, atomic get-and-delete, delete and TTL lookup.
//!
//! Keys are masked before logging.
//!
//! Connection establishment retries with exponential backoff. Individual
//! commands do not: a failed or timed-out command is reported once and the
//! caller decides what to do.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, Script};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use cb_shared::utils::mask::mask_key;

use crate::cache::CacheConfig;
use crate::InfrastructureError;

/// Deletes KEYS[1] only when it holds ARGV[1].
/// Returns 1 when deleted, 0 when the value differs, -1 when absent.
const COMPARE_AND_DELETE_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if not current then
    return -1
end
if current == ARGV[1] then
    redis.call('DEL', KEYS[1])
    return 1
end
return 0
"#;

/// Returns the value of KEYS[1] and deletes it in the same step.
const GET_AND_DELETE_SCRIPT: &str = r#"
local current = redis.call('GET', KEYS[1])
if current then
    redis.call('DEL', KEYS[1])
end
return current
"#;

/// Upper bound for the connection backoff delay
const MAX_CONNECT_DELAY_MS: u64 = 5000;

/// Redis cache client
///
/// Cheap to clone: clones share the multiplexed connection and the loaded
/// scripts.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
    compare_and_delete: Script,
    get_and_delete: Script,
}

impl RedisClient {
    /// Create a new Redis client
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Ok(RedisClient)` - Connected client
    /// * `Err(InfrastructureError::Config)` - The URL could not be parsed
    /// * `Err(InfrastructureError::Cache)` - Every connection attempt failed
    ///
    /// # Example
    /// ```no_run
    /// use cb_infra::cache::{CacheConfig, RedisClient};
    ///
    /// async fn create_client() -> Result<RedisClient, Box<dyn std::error::Error>> {
    ///     let client = RedisClient::new(CacheConfig::new("redis://localhost:6379")).await?;
    ///     Ok(client)
    /// }
    /// ```
    pub async fn new(config: CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client with URL: {}", mask_url(&config.url));

        // Parse Redis URL and create client
        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::create_connection_with_retry(
            client,
            config.connect_retries.max(1),
            config.connect_retry_delay_ms,
        )
        .await?;

        info!("Redis client created successfully");

        Ok(Self {
            connection,
            compare_and_delete: Script::new(COMPARE_AND_DELETE_SCRIPT),
            get_and_delete: Script::new(GET_AND_DELETE_SCRIPT),
        })
    }

    /// Create multiplexed connection with retry logic
    async fn create_connection_with_retry(
        client: Client,
        max_attempts: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = (delay * 2).min(MAX_CONNECT_DELAY_MS);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Store `value` under `key` with an expiry unless the key exists
    /// (`SET key value NX EX ttl`)
    ///
    /// # Returns
    /// * `Ok(true)` - Value stored
    /// * `Ok(false)` - Key already present, nothing written
    pub async fn set_nx_ex(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("EX")
            .arg(expiry_seconds)
            .query_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to set key '{}': {}", mask_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        let stored = reply.is_some();
        debug!("SET NX on '{}' stored: {}", mask_key(key), stored);
        Ok(stored)
    }

    /// Atomically delete `key` if it holds `expected`
    ///
    /// # Returns
    /// * `Ok(1)` - Value matched and was deleted
    /// * `Ok(0)` - Value differs, key untouched
    /// * `Ok(-1)` - Key absent
    pub async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<i64, InfrastructureError> {
        let mut conn = self.connection.clone();
        let outcome: i64 = self
            .compare_and_delete
            .key(key)
            .arg(expected)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to compare-and-delete key '{}': {}", mask_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        debug!("Compare-and-delete on '{}' returned {}", mask_key(key), outcome);
        Ok(outcome)
    }

    /// Atomically fetch and delete `key`
    pub async fn get_and_delete(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = self
            .get_and_delete
            .key(key)
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to get-and-delete key '{}': {}", mask_key(key), e);
                InfrastructureError::Cache(e)
            })?;

        debug!("Get-and-delete on '{}' found value: {}", mask_key(key), value.is_some());
        Ok(value)
    }

    /// Delete a key from cache
    ///
    /// # Returns
    /// * `Result<bool, InfrastructureError>` - True if key was deleted, false if not found
    pub async fn delete(&self, key: &str) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let deleted_count: u32 = conn.del(key).await.map_err(|e| {
            error!("Failed to delete key '{}': {}", mask_key(key), e);
            InfrastructureError::Cache(e)
        })?;

        debug!("Deleted key '{}': {}", mask_key(key), deleted_count > 0);
        Ok(deleted_count > 0)
    }

    /// Get time-to-live for a key
    ///
    /// # Returns
    /// * `Result<Option<i64>, InfrastructureError>` - TTL in seconds, None if key doesn't exist or has no expiry
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let ttl: i64 = conn.ttl(key).await.map_err(|e| {
            error!("Failed to get TTL for key '{}': {}", mask_key(key), e);
            InfrastructureError::Cache(e)
        })?;

        // -1: no expiry, -2: missing
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Check if the Redis connection is healthy
    ///
    /// Performs a PING command to verify connectivity.
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
            Ok(response) if response == "PONG" => {
                debug!("Redis health check passed");
                Ok(true)
            }
            Ok(response) => {
                warn!("Redis health check returned unexpected response: {}", response);
                Ok(false)
            }
            Err(e) => {
                error!("Redis health check failed: {}", e);
                Err(InfrastructureError::Cache(e))
            }
        }
    }
}

/// Mask credentials in a Redis URL for logging
pub(crate) fn mask_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}****{}", &url[..scheme_end + 3], &url[at..])
        }
        _ => url.to_string(),
    }
}
