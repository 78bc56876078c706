//! Cache Service Module
//!
//! Turns raw backend lookups into cache semantics. The backend is injected
//! as a trait object; this layer neither knows nor cares which one it is.
//!
//! A lookup is a hit only when the entry exists and its expiry has not
//! passed. Anything else is a miss, and a miss fills itself: a placeholder
//! value is synthesized, written through the cache (with whatever capacity
//! and eviction consequences that write has), and returned. Reads can
//! therefore mutate cache state.

mod stats;

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::cache::Cache;
use crate::error::Result;

pub use stats::{ServiceStats, StatsSnapshot};

// == Cache Service ==
/// Orchestration layer above one concrete cache backend.
pub struct CacheService {
    cache: Arc<dyn Cache>,
    stats: ServiceStats,
}

impl CacheService {
    // == Constructor ==
    /// Wraps `cache` with service semantics and fresh counters.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            stats: ServiceStats::new(),
        }
    }

    // == Get Key ==
    /// Returns the value stored under `key`, filling the cache on a miss.
    ///
    /// # Arguments
    /// * `key` - The cache key to look up
    ///
    /// # Returns
    /// The stored value on a hit. On a miss (absent or expired), a
    /// timestamp placeholder is upserted and that new value is returned.
    pub async fn get_key(&self, key: &str) -> Result<String> {
        match self.cache.get(key).await? {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                info!(key, "Cache hit");
                Ok(entry.value)
            }
            _ => {
                self.stats.record_miss();
                info!(key, "Cache miss");
                let value = Utc::now().timestamp_millis().to_string();
                self.cache.upsert(key, &value).await?;
                Ok(value)
            }
        }
    }

    // == Get Keys ==
    /// Returns a page of `(key, value)` pairs in the backend's enumeration
    /// order, with expiry stamps stripped for external consumers.
    pub async fn get_keys(&self, skip: usize, take: usize) -> Result<Vec<(String, String)>> {
        let entries = self.cache.get_range(skip, take).await?;
        Ok(entries
            .into_iter()
            .map(|(key, entry)| (key, entry.value))
            .collect())
    }

    // == Pass-Throughs ==
    /// Stores `value` under `key`.
    pub async fn upsert_key(&self, key: &str, value: &str) -> Result<()> {
        self.cache.upsert(key, value).await
    }

    /// Removes `key` if present.
    pub async fn delete_key(&self, key: &str) -> Result<()> {
        self.cache.delete(key).await
    }

    /// Removes every entry.
    pub async fn delete_all_keys(&self) -> Result<()> {
        self.cache.purge().await
    }

    /// Returns the backend's entry count.
    pub async fn size(&self) -> Result<usize> {
        self.cache.size().await
    }

    /// Returns the current hit/miss counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}
