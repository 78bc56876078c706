//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables. The resulting `Config` is immutable, built once at startup and
//! passed by reference into constructors; engine code never reads the
//! environment on its own.

use std::env;
use std::str::FromStr;

/// Storage backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Process-local insertion-ordered map
    Memory,
    /// SQLite-backed document collection
    Sqlite,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "sqlite" => Ok(Backend::Sqlite),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// Eviction policy selector.
///
/// Both policies order candidates by `expires_at` alone; no access recency is
/// tracked anywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evict the entry whose expiry instant is smallest (closest to expiring)
    OldestExpiry,
    /// Evict the entry whose expiry instant is largest (freshest write)
    NewestExpiry,
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "oldest-expiry" | "oldest" => Ok(EvictionPolicy::OldestExpiry),
            "newest-expiry" | "newest" => Ok(EvictionPolicy::NewestExpiry),
            other => Err(format!("unknown eviction policy '{other}'")),
        }
    }
}

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Time-to-live applied to every written entry, in seconds
    pub ttl_seconds: u64,
    /// Maximum number of entries a cache backend may hold
    pub max_capacity: usize,
    /// Which storage backend to run
    pub backend: Backend,
    /// Which entry to remove when capacity is exceeded
    pub eviction: EvictionPolicy,
    /// HTTP server port
    pub server_port: u16,
    /// SQLite database file (sqlite backend only)
    pub database_path: String,
    /// Name of the backing collection (sqlite backend only)
    pub collection_name: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL_SECONDS` - Entry TTL in seconds (default: 60)
    /// - `CACHE_MAX_CAPACITY` - Maximum entries per backend (default: 1000)
    /// - `CACHE_BACKEND` - `memory` or `sqlite` (default: memory)
    /// - `CACHE_EVICTION` - `oldest-expiry` or `newest-expiry`
    ///   (default: oldest-expiry)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `DATABASE_PATH` - SQLite file path (default: cache.db)
    /// - `COLLECTION_NAME` - backing table name (default: cache)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            max_capacity: env::var("CACHE_MAX_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Backend::Memory),
            eviction: env::var("CACHE_EVICTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(EvictionPolicy::OldestExpiry),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "cache.db".to_string()),
            collection_name: env::var("COLLECTION_NAME").unwrap_or_else(|_| "cache".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_seconds: 60,
            max_capacity: 1000,
            backend: Backend::Memory,
            eviction: EvictionPolicy::OldestExpiry,
            server_port: 3000,
            database_path: "cache.db".to_string(),
            collection_name: "cache".to_string(),
        }
    }
}
