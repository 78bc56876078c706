//! Persistent Cache Module
//!
//! A cache backend over a [`DocumentCollection`], one document per entry.
//! Point reads, deletes and purges map directly onto collection calls;
//! eviction candidates are selected by the collection's expiry ordering and
//! removed by internal identity. The collection handle is serialized behind
//! a mutex, so the capacity check, eviction and write of an upsert cannot
//! interleave with another writer.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::cache::eviction::{EvictionStrategy, NewestExpiryEviction, OldestExpiryEviction};
use crate::cache::value::TtlValue;
use crate::cache::Cache;
use crate::collection::DocumentCollection;
use crate::config::{Config, EvictionPolicy};
use crate::error::Result;

// == Persistent Cache ==
/// Cache backend delegating storage to a document collection.
pub struct PersistentCache {
    collection: Mutex<Box<dyn DocumentCollection>>,
    eviction: Box<dyn EvictionStrategy<dyn DocumentCollection>>,
    ttl_seconds: u64,
    max_capacity: usize,
}

impl PersistentCache {
    // == Constructors ==
    /// Wraps `collection` as a cache backend.
    ///
    /// # Arguments
    /// * `collection` - The document collection holding the entries
    /// * `ttl_seconds` - Lifetime stamped on every written entry
    /// * `max_capacity` - Entry count that triggers eviction
    /// * `eviction` - Policy consulted when the cache is full
    pub fn new(
        collection: Box<dyn DocumentCollection>,
        ttl_seconds: u64,
        max_capacity: usize,
        eviction: Box<dyn EvictionStrategy<dyn DocumentCollection>>,
    ) -> Self {
        Self {
            collection: Mutex::new(collection),
            eviction,
            ttl_seconds,
            max_capacity,
        }
    }

    /// Wraps `collection` with TTL, capacity and eviction policy taken from
    /// `config`.
    pub fn from_config(config: &Config, collection: Box<dyn DocumentCollection>) -> Self {
        let eviction: Box<dyn EvictionStrategy<dyn DocumentCollection>> = match config.eviction {
            EvictionPolicy::OldestExpiry => Box::new(OldestExpiryEviction),
            EvictionPolicy::NewestExpiry => Box::new(NewestExpiryEviction),
        };
        Self::new(collection, config.ttl_seconds, config.max_capacity, eviction)
    }

    // == Initialize ==
    /// Prepares the backing collection: drops whatever was stored under its
    /// name and recreates it with the key and expiry indexes eviction
    /// queries rely on. Destructive, and must run once before first use.
    pub async fn initialize(&self) -> Result<()> {
        self.collection.lock().await.initialize().await
    }
}

#[async_trait]
impl Cache for PersistentCache {
    async fn size(&self) -> Result<usize> {
        self.collection.lock().await.count().await
    }

    async fn get(&self, key: &str) -> Result<Option<TtlValue>> {
        let document = self.collection.lock().await.find_by_key(key).await?;
        Ok(document.map(|doc| TtlValue::with_expiry(doc.value, doc.expires_at)))
    }

    async fn get_range(&self, skip: usize, take: usize) -> Result<Vec<(String, TtlValue)>> {
        let documents = self.collection.lock().await.find_page(skip, take).await?;
        Ok(documents
            .into_iter()
            .map(|doc| (doc.key, TtlValue::with_expiry(doc.value, doc.expires_at)))
            .collect())
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let mut collection = self.collection.lock().await;
        // Evict before the write, replacement included, so post-write size
        // never exceeds capacity
        if collection.count().await? >= self.max_capacity {
            self.eviction.evict(collection.as_mut()).await?;
        }
        let entry = TtlValue::new(value, self.ttl_seconds);
        collection
            .replace_by_key(key, &entry.value, entry.expires_at)
            .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.collection.lock().await.delete_by_key(key).await
    }

    async fn purge(&self) -> Result<()> {
        self.collection.lock().await.delete_all().await
    }
}
