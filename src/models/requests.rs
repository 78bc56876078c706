//! Request DTOs for the cache service API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::cache::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};

/// Request body for the upsert operation (PUT /keys/:key)
///
/// The key rides in the path; the body carries only the value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertKeyRequest {
    /// The value to store
    pub value: String,
}

impl UpsertKeyRequest {
    /// Validates the request together with the path key.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, key: &str) -> Option<String> {
        validate_key(key).or_else(|| {
            if self.value.len() > MAX_VALUE_SIZE {
                return Some(format!(
                    "Value exceeds maximum size of {} bytes",
                    MAX_VALUE_SIZE
                ));
            }
            None
        })
    }
}

/// Validates a path key on its own, for operations without a body.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Query string for the list operation (GET /keys?skip=&take=)
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    /// Entries to skip before the page starts
    #[serde(default)]
    pub skip: usize,
    /// Page size
    #[serde(default = "default_take")]
    pub take: usize,
}

fn default_take() -> usize {
    50
}
