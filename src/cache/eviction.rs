//! Eviction Strategy Module
//!
//! Capacity-overflow policies. A strategy inspects a backend's full entry
//! set and removes exactly one entry, chosen by its `expires_at` stamp
//! alone. Access history plays no part: reading an entry never improves its
//! survival odds.

use async_trait::async_trait;

use crate::cache::memory::EntryMap;
use crate::collection::{DocumentCollection, SortOrder};
use crate::error::Result;

// == Eviction Contract ==
/// Picks and removes one victim from an entry set of type `S`.
///
/// Evicting from an empty set is a silent no-op, never an error. Ties on
/// `expires_at` resolve to whichever entry the backend enumerates first.
#[async_trait]
pub trait EvictionStrategy<S: ?Sized>: Send + Sync {
    async fn evict(&self, entries: &mut S) -> Result<()>;
}

// == Policies ==
/// Evicts the entry with the smallest `expires_at`: the one already expired
/// or closest to expiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct OldestExpiryEviction;

/// Evicts the entry with the largest `expires_at`: the one freshest by TTL.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewestExpiryEviction;

// == In-Memory Implementations ==
#[async_trait]
impl EvictionStrategy<EntryMap> for OldestExpiryEviction {
    async fn evict(&self, entries: &mut EntryMap) -> Result<()> {
        let victim = entries
            .iter()
            .min_by_key(|(_, value)| value.expires_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            entries.remove(&key);
        }
        Ok(())
    }
}

#[async_trait]
impl EvictionStrategy<EntryMap> for NewestExpiryEviction {
    async fn evict(&self, entries: &mut EntryMap) -> Result<()> {
        // Iterator::max_by_key keeps the last of equal maxima, but ties
        // here resolve to the first enumerated entry
        let victim = entries
            .iter()
            .reduce(|newest, candidate| {
                if candidate.1.expires_at > newest.1.expires_at {
                    candidate
                } else {
                    newest
                }
            })
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            entries.remove(&key);
        }
        Ok(())
    }
}

// == Document Collection Implementations ==
// Candidate selection is pushed down to the collection's expiry index; the
// victim is then deleted by internal identity, not by key.
#[async_trait]
impl EvictionStrategy<dyn DocumentCollection> for OldestExpiryEviction {
    async fn evict(&self, collection: &mut (dyn DocumentCollection + 'static)) -> Result<()> {
        if let Some(victim) = collection.first_by_expiry(SortOrder::Ascending).await? {
            collection.delete_by_id(victim.id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl EvictionStrategy<dyn DocumentCollection> for NewestExpiryEviction {
    async fn evict(&self, collection: &mut (dyn DocumentCollection + 'static)) -> Result<()> {
        if let Some(victim) = collection.first_by_expiry(SortOrder::Descending).await? {
            collection.delete_by_id(victim.id).await?;
        }
        Ok(())
    }
}
