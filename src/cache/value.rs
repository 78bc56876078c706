//! TTL Value Module
//!
//! Defines the stored unit: a value plus the instant it expires.

use chrono::{DateTime, Duration, Utc};

// == TTL Value ==
/// A cached value together with its expiry instant.
///
/// Immutable once created; an upsert of the same key replaces the whole
/// value, refreshing `expires_at`. Reads never mutate it; in particular,
/// returning an already-expired `TtlValue` from a backend is valid, and
/// interpreting staleness is the service layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlValue {
    /// The stored value
    pub value: String,
    /// The instant this entry stops being fresh
    pub expires_at: DateTime<Utc>,
}

impl TtlValue {
    // == Constructor ==
    /// Creates a value expiring `ttl_seconds` from now.
    pub fn new(value: impl Into<String>, ttl_seconds: u64) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
        }
    }

    /// Creates a value with an explicit expiry instant.
    ///
    /// Used when rehydrating entries from a backing collection and for
    /// seeding deterministic expiries in tests.
    pub fn with_expiry(value: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    // == Is Expired ==
    /// Whether the expiry instant lies strictly in the past.
    ///
    /// An entry expiring exactly "now" is still fresh; only instants strictly
    /// before the current time count as expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at < Utc::now()
    }
}
