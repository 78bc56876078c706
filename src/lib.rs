//! TTL Cache - a TTL-bounded key-value cache service
//!
//! Stores opaque string values under string keys with per-entry expiry,
//! bounds entry count with expiry-ordered eviction, and fills read misses
//! through the cache. Backends (in-memory, document collection) are
//! interchangeable behind one contract.

pub mod api;
pub mod cache;
pub mod collection;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use api::AppState;
pub use config::Config;
pub use service::CacheService;
