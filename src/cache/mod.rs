//! Cache Module
//!
//! The TTL cache engine: the backend-agnostic `Cache` contract, the bounded
//! in-memory and document-collection implementations behind it, and the
//! expiry-ordered eviction strategies they share.
//!
//! Expiry is lazy. Backends store and return entries untouched, expired or
//! not; deciding what a stale value means belongs to the service layer.

mod eviction;
mod memory;
mod persistent;
mod value;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use eviction::{EvictionStrategy, NewestExpiryEviction, OldestExpiryEviction};
pub use memory::{EntryMap, InMemoryCache};
pub use persistent::PersistentCache;
pub use value::TtlValue;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Cache Contract ==
/// Storage contract shared by every cache backend.
///
/// Implementations are internally synchronized; callers hold a shared
/// reference and may invoke operations concurrently.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the number of stored entries, counting expired ones that have
    /// not yet been overwritten or removed.
    async fn size(&self) -> Result<usize>;

    /// Looks up `key`.
    ///
    /// # Arguments
    /// * `key` - The cache key to look up
    ///
    /// # Returns
    /// The stored value with its expiry, or `None` when the key is absent.
    /// Expired entries are returned as-is; interpreting staleness is the
    /// caller's concern.
    async fn get(&self, key: &str) -> Result<Option<TtlValue>>;

    /// Returns up to `take` entries after skipping `skip`, in the backend's
    /// enumeration order. Pages past the end of the set come back short or
    /// empty rather than failing.
    async fn get_range(&self, skip: usize, take: usize) -> Result<Vec<(String, TtlValue)>>;

    /// Inserts or replaces `key`, stamping a fresh expiry of now + TTL.
    ///
    /// When the cache already holds `max_capacity` entries, one entry is
    /// evicted before the write goes in.
    async fn upsert(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Deleting an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry.
    async fn purge(&self) -> Result<()>;
}
