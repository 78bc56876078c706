//! In-Memory Cache Module
//!
//! A process-local cache backend over an insertion-ordered entry map.
//! Enumeration order is the order keys were first inserted; replacing a key
//! keeps its position. Whole-map scans for eviction are O(n), which is fine
//! at the modest capacities this backend is configured with.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::eviction::{EvictionStrategy, NewestExpiryEviction, OldestExpiryEviction};
use crate::cache::value::TtlValue;
use crate::cache::Cache;
use crate::config::{Config, EvictionPolicy};
use crate::error::Result;

// == Entry Map ==
/// Key to value mapping that remembers insertion order.
///
/// The map owns lookups, the queue owns enumeration order. The two are kept
/// in sync: every mapped key appears in the queue exactly once.
#[derive(Debug, Default)]
pub struct EntryMap {
    entries: HashMap<String, TtlValue>,
    order: VecDeque<String>,
}

impl EntryMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the stored value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&TtlValue> {
        self.entries.get(key)
    }

    /// Inserts or replaces `key`. A replaced key keeps its original
    /// enumeration position; only brand-new keys go to the back.
    pub fn insert(&mut self, key: &str, value: TtlValue) {
        if self.entries.insert(key.to_string(), value).is_none() {
            self.order.push_back(key.to_string());
        }
    }

    /// Removes `key`, returning the stored value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<TtlValue> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TtlValue)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get_key_value(key))
    }

    /// Clones out up to `take` entries after skipping `skip`, in insertion
    /// order.
    pub fn page(&self, skip: usize, take: usize) -> Vec<(String, TtlValue)> {
        self.iter()
            .skip(skip)
            .take(take)
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

// == In-Memory Cache ==
/// Cache backend over an [`EntryMap`] behind an async read/write lock.
///
/// Writers hold the lock across the capacity check, eviction and insert, so
/// concurrent upserts cannot race the cache past its capacity.
pub struct InMemoryCache {
    entries: RwLock<EntryMap>,
    eviction: Box<dyn EvictionStrategy<EntryMap>>,
    ttl_seconds: u64,
    max_capacity: usize,
}

impl InMemoryCache {
    // == Constructors ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `ttl_seconds` - Lifetime stamped on every written entry
    /// * `max_capacity` - Entry count that triggers eviction
    /// * `eviction` - Policy consulted when the cache is full
    pub fn new(
        ttl_seconds: u64,
        max_capacity: usize,
        eviction: Box<dyn EvictionStrategy<EntryMap>>,
    ) -> Self {
        Self {
            entries: RwLock::new(EntryMap::new()),
            eviction,
            ttl_seconds,
            max_capacity,
        }
    }

    /// Creates a cache with TTL, capacity and eviction policy taken from
    /// `config`.
    pub fn from_config(config: &Config) -> Self {
        let eviction: Box<dyn EvictionStrategy<EntryMap>> = match config.eviction {
            EvictionPolicy::OldestExpiry => Box::new(OldestExpiryEviction),
            EvictionPolicy::NewestExpiry => Box::new(NewestExpiryEviction),
        };
        Self::new(config.ttl_seconds, config.max_capacity, eviction)
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn size(&self) -> Result<usize> {
        Ok(self.entries.read().await.len())
    }

    async fn get(&self, key: &str) -> Result<Option<TtlValue>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn get_range(&self, skip: usize, take: usize) -> Result<Vec<(String, TtlValue)>> {
        Ok(self.entries.read().await.page(skip, take))
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        // Evict before the write, replacement included, so post-write size
        // never exceeds capacity
        if entries.len() >= self.max_capacity {
            self.eviction.evict(&mut *entries).await?;
        }
        entries.insert(key, TtlValue::new(value, self.ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn purge(&self) -> Result<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Backend;
    use std::time::Duration;

    fn oldest_expiry_cache(capacity: usize) -> InMemoryCache {
        InMemoryCache::new(60, capacity, Box::new(OldestExpiryEviction))
    }

    fn newest_expiry_cache(capacity: usize) -> InMemoryCache {
        InMemoryCache::new(60, capacity, Box::new(NewestExpiryEviction))
    }

    /// Upserts keys in order with distinct expiry stamps.
    async fn seed_in_order(cache: &InMemoryCache, keys: &[&str]) {
        for key in keys {
            cache.upsert(key, "v").await.unwrap();
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    }

    #[test]
    fn test_entry_map_replace_keeps_position() {
        let mut entries = EntryMap::new();
        entries.insert("a", TtlValue::new("1", 60));
        entries.insert("b", TtlValue::new("2", 60));
        entries.insert("c", TtlValue::new("3", 60));

        entries.insert("b", TtlValue::new("2-replaced", 60));

        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries.get("b").unwrap().value, "2-replaced");
    }

    #[test]
    fn test_entry_map_remove_keeps_remaining_order() {
        let mut entries = EntryMap::new();
        entries.insert("a", TtlValue::new("1", 60));
        entries.insert("b", TtlValue::new("2", 60));
        entries.insert("c", TtlValue::new("3", 60));

        assert!(entries.remove("b").is_some());
        assert!(entries.remove("missing").is_none());

        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let cache = oldest_expiry_cache(10);
        assert!(cache.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let cache = oldest_expiry_cache(10);

        cache.upsert("foo", "bar").await.unwrap();

        let value = cache.get("foo").await.unwrap().unwrap();
        assert_eq!(value.value, "bar");
        assert!(!value.is_expired());
        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_returns_expired_entries_untouched() {
        let cache = InMemoryCache::new(0, 10, Box::new(OldestExpiryEviction));

        cache.upsert("stale", "v").await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        // The backend hands back expired entries; it never filters them
        let value = cache.get("stale").await.unwrap().unwrap();
        assert!(value.is_expired());
        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replacing_upsert_refreshes_expiry() {
        let cache = oldest_expiry_cache(10);

        cache.upsert("key", "first").await.unwrap();
        let first = cache.get("key").await.unwrap().unwrap();

        tokio::time::sleep(Duration::from_millis(5)).await;
        cache.upsert("key", "second").await.unwrap();
        let second = cache.get("key").await.unwrap().unwrap();

        assert_eq!(cache.size().await.unwrap(), 1);
        assert_eq!(second.value, "second");
        assert!(second.expires_at > first.expires_at);
    }

    #[tokio::test]
    async fn test_oldest_expiry_eviction_at_capacity() {
        let cache = oldest_expiry_cache(3);
        seed_in_order(&cache, &["0", "1", "2"]).await;

        cache.upsert("new", "v").await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 3);
        assert!(cache.get("0").await.unwrap().is_none());
        assert!(cache.get("1").await.unwrap().is_some());
        assert!(cache.get("2").await.unwrap().is_some());
        assert!(cache.get("new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_newest_expiry_eviction_at_capacity() {
        let cache = newest_expiry_cache(3);
        seed_in_order(&cache, &["0", "1", "2"]).await;

        cache.upsert("new", "v").await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 3);
        assert!(cache.get("2").await.unwrap().is_none());
        assert!(cache.get("0").await.unwrap().is_some());
        assert!(cache.get("1").await.unwrap().is_some());
        assert!(cache.get("new").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upserts_below_capacity_never_evict() {
        let cache = oldest_expiry_cache(5);
        seed_in_order(&cache, &["a", "b", "c", "d"]).await;

        assert_eq!(cache.size().await.unwrap(), 4);
        for key in ["a", "b", "c", "d"] {
            assert!(cache.get(key).await.unwrap().is_some());
        }
    }

    #[tokio::test]
    async fn test_replacing_upsert_at_capacity_still_evicts() {
        let cache = oldest_expiry_cache(2);
        seed_in_order(&cache, &["a", "b"]).await;

        // "a" holds the oldest expiry, so it is the victim even though the
        // write replaces it; the rewrite lands it at the back of the order
        cache.upsert("a", "again").await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 2);
        let keys: Vec<String> = cache
            .get_range(0, 10)
            .await
            .unwrap()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_get_range_pages_in_insertion_order() {
        let cache = oldest_expiry_cache(1000);
        for i in 0..100 {
            cache.upsert(&format!("key-{i}"), &i.to_string()).await.unwrap();
        }

        let first_page = cache.get_range(0, 10).await.unwrap();
        let keys: Vec<String> = first_page.into_iter().map(|(key, _)| key).collect();
        let expected: Vec<String> = (0..10).map(|i| format!("key-{i}")).collect();
        assert_eq!(keys, expected);

        let second_page = cache.get_range(10, 10).await.unwrap();
        let keys: Vec<String> = second_page.into_iter().map(|(key, _)| key).collect();
        let expected: Vec<String> = (10..20).map(|i| format!("key-{i}")).collect();
        assert_eq!(keys, expected);
    }

    #[tokio::test]
    async fn test_get_range_short_and_empty_pages() {
        let cache = oldest_expiry_cache(1000);
        for i in 0..100 {
            cache.upsert(&format!("key-{i}"), "v").await.unwrap();
        }

        assert_eq!(cache.get_range(95, 10).await.unwrap().len(), 5);
        assert!(cache.get_range(200, 10).await.unwrap().is_empty());
        assert!(cache.get_range(0, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_noop() {
        let cache = oldest_expiry_cache(10);
        cache.upsert("keep", "v").await.unwrap();

        cache.delete("missing").await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let cache = oldest_expiry_cache(10);
        cache.upsert("gone", "v").await.unwrap();

        cache.delete("gone").await.unwrap();

        assert!(cache.get("gone").await.unwrap().is_none());
        assert_eq!(cache.size().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_purge_empties_the_cache() {
        let cache = oldest_expiry_cache(10);
        seed_in_order(&cache, &["a", "b", "c"]).await;

        cache.purge().await.unwrap();

        assert_eq!(cache.size().await.unwrap(), 0);
        assert!(cache.get("a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_from_config_applies_eviction_policy() {
        let config = Config {
            ttl_seconds: 60,
            max_capacity: 3,
            backend: Backend::Memory,
            eviction: EvictionPolicy::NewestExpiry,
            ..Config::default()
        };
        let cache = InMemoryCache::from_config(&config);
        seed_in_order(&cache, &["0", "1", "2"]).await;

        cache.upsert("new", "v").await.unwrap();

        assert!(cache.get("2").await.unwrap().is_none());
        assert!(cache.get("0").await.unwrap().is_some());
    }
}
