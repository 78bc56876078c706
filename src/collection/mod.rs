//! Document Collection Module
//!
//! The driver seam for the persistent cache backend. A collection stores one
//! document per cache entry (`key` unique, plus `value` and `expires_at`) and
//! exposes only the operations the cache engine needs: counting, point
//! lookup, paged enumeration, sorted-by-expiry candidate selection, upsert by
//! key, and deletes. Everything behind this trait (connection handling,
//! indexing, durability) belongs to the driver.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;

mod sqlite;

pub use sqlite::SqliteCollection;

// == Document Identity ==
/// Store-assigned internal identity of a document.
///
/// Assigned on first insert and preserved across replace-by-key, so it
/// doubles as a stable insertion-order enumeration key.
pub type DocumentId = i64;

// == Cache Document ==
/// One persisted cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheDocument {
    /// Internal identity (see [`DocumentId`])
    pub id: DocumentId,
    /// Cache key, unique within the collection
    pub key: String,
    /// Stored value
    pub value: String,
    /// Expiry instant
    pub expires_at: DateTime<Utc>,
}

// == Sort Order ==
/// Direction for expiry-ordered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Smallest `expires_at` first
    Ascending,
    /// Largest `expires_at` first
    Descending,
}

// == Document Collection Trait ==
/// Operations a collection driver must provide.
///
/// Methods take `&mut self`: the persistent backend owns its driver handle
/// behind a per-instance lock, which also serializes the capacity
/// check/evict/write sequence of an upsert. Driver failures surface as
/// [`crate::error::CacheError::StorageUnavailable`] and are propagated
/// without retry.
#[async_trait]
pub trait DocumentCollection: Send {
    /// Drops and recreates the backing storage, then builds a uniqueness
    /// constraint on `key` and a secondary index on `expires_at`.
    ///
    /// Idempotent but destructive: any prior contents under this collection's
    /// name are discarded.
    async fn initialize(&mut self) -> Result<()>;

    /// Number of documents currently stored.
    async fn count(&mut self) -> Result<usize>;

    /// Point lookup by cache key.
    async fn find_by_key(&mut self, key: &str) -> Result<Option<CacheDocument>>;

    /// Up to `take` documents after skipping `skip`, enumerated in internal
    /// identity order (insertion order). Returns short pages near the end of
    /// the collection rather than failing.
    async fn find_page(&mut self, skip: usize, take: usize) -> Result<Vec<CacheDocument>>;

    /// The single document at the head of the expiry ordering, or `None` if
    /// the collection is empty.
    async fn first_by_expiry(&mut self, order: SortOrder) -> Result<Option<CacheDocument>>;

    /// Inserts the document, or replaces the existing one with the same key.
    /// Replacement keeps the document's internal identity.
    async fn replace_by_key(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Deletes the document with this key, if any.
    async fn delete_by_key(&mut self, key: &str) -> Result<()>;

    /// Deletes the document with this internal identity, if any.
    async fn delete_by_id(&mut self, id: DocumentId) -> Result<()>;

    /// Deletes every document in the collection.
    async fn delete_all(&mut self) -> Result<()>;
}
