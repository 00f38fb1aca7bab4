//! Cache module for Redis-based one-time code storage
//!
//! Provides the Redis client (start-up connection retry, single-shot
//! commands, atomic scripts) and the `CodeStoreBackend` built on it.

pub mod code_store;
pub mod redis_client;

#[cfg(test)]
mod tests;

pub use code_store::RedisCodeStore;
pub use redis_client::RedisClient;

// Re-export commonly used types
pub use cb_shared::config::CacheConfig;
