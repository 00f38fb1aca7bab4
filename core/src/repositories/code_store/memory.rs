//! In-process code store backend for tests and single-node development

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use tokio::time::Instant;

use crate::errors::DomainError;

use super::r#trait::{CodeCheck, CodeStoreBackend};

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Minimum spacing between full sweeps of expired entries
const SWEEP_INTERVAL: Duration = Duration::from_secs(10);

struct Entries {
    map: HashMap<String, Entry>,
    next_sweep: Instant,
}

impl Entries {
    /// Drops every expired entry, at most once per `SWEEP_INTERVAL`
    fn sweep_expired(&mut self, now: Instant) {
        if now < self.next_sweep {
            return;
        }
        self.map.retain(|_, e| e.is_live(now));
        self.next_sweep = now + SWEEP_INTERVAL;
    }
}

/// Code store backed by a mutex-guarded map
///
/// Expired entries are dropped when touched, and inserts periodically sweep
/// the whole map so codes that are never presented do not accumulate. Each
/// operation holds the lock for its whole check-and-mutate step, which gives
/// the same atomicity the Redis backend gets from server-side scripts.
pub struct InMemoryCodeStore {
    entries: Mutex<Entries>,
}

impl InMemoryCodeStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Entries {
                map: HashMap::new(),
                next_sweep: Instant::now() + SWEEP_INTERVAL,
            }),
        }
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|entries| entries.map.values().filter(|e| e.is_live(now)).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of entries held, expired ones included
    pub(crate) fn stored_entries(&self) -> usize {
        self.lock().map(|entries| entries.map.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Entries>, DomainError> {
        self.entries.lock().map_err(|_| DomainError::Store {
            message: "in-memory code store lock poisoned".to_string(),
        })
    }

    /// Removes `key` if it has expired, returning the live entry otherwise
    fn live_entry<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
        now: Instant,
    ) -> Option<&'a Entry> {
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        entries.get(key)
    }
}

impl Default for InMemoryCodeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CodeStoreBackend for InMemoryCodeStore {
    async fn set_if_absent(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<bool, DomainError> {
        let now = Instant::now();
        let expires_at = now
            .checked_add(Duration::from_secs(ttl_seconds))
            .ok_or_else(|| DomainError::Store {
                message: format!("code lifetime of {} seconds is out of range", ttl_seconds),
            })?;

        let mut entries = self.lock()?;
        entries.sweep_expired(now);
        if Self::live_entry(&mut entries.map, key, now).is_some() {
            return Ok(false);
        }
        entries.map.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(true)
    }

    async fn compare_and_delete(&self, key: &str, expected: &str) -> Result<CodeCheck, DomainError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        let check = match Self::live_entry(&mut entries.map, key, now) {
            None => CodeCheck::Missing,
            Some(e) if constant_time_eq(e.value.as_bytes(), expected.as_bytes()) => CodeCheck::Matched,
            Some(_) => CodeCheck::Mismatched,
        };
        if check.is_matched() {
            entries.map.remove(key);
        }
        Ok(check)
    }

    async fn get_and_delete(&self, key: &str) -> Result<Option<String>, DomainError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(entries
            .map
            .remove(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value))
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(entries.map.remove(key).is_some_and(|e| e.is_live(now)))
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, DomainError> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(Self::live_entry(&mut entries.map, key, now).map(|e| {
            // Partial seconds count as a whole second
            let remaining = e.expires_at.saturating_duration_since(now);
            let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            secs as i64
        }))
    }
}
