//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, HealthResponse, KeyValueResponse, ListQuery, StatsResponse, UpsertKeyRequest,
};
use crate::service::CacheService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache service fronting the configured backend
    pub service: Arc<CacheService>,
}

impl AppState {
    /// Creates a new AppState around the given service.
    pub fn new(service: CacheService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for GET /keys/:key
///
/// Always yields a value: a miss (absent or expired) fills the cache and
/// returns the freshly stored value.
pub async fn get_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<KeyValueResponse>> {
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let value = state.service.get_key(&key).await?;
    Ok(Json(KeyValueResponse::new(key, value)))
}

/// Handler for GET /keys?skip=&take=
///
/// Lists a page of key/value pairs in the backend's enumeration order.
pub async fn list_keys_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<KeyValueResponse>>> {
    let entries = state.service.get_keys(query.skip, query.take).await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|(key, value)| KeyValueResponse::new(key, value))
            .collect(),
    ))
}

/// Handler for PUT /keys/:key
///
/// Stores the body's value under the path key.
pub async fn upsert_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<UpsertKeyRequest>,
) -> Result<StatusCode> {
    // Validate request
    if let Some(error_msg) = req.validate(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    state.service.upsert_key(&key, &req.value).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /keys/:key
///
/// Removes the key; deleting an absent key still succeeds.
pub async fn delete_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state.service.delete_key(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for DELETE /keys
///
/// Removes every entry.
pub async fn delete_all_keys_handler(State(state): State<AppState>) -> Result<StatusCode> {
    state.service.delete_all_keys().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns hit/miss counters and the current entry count.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let entries = state.service.size().await?;
    Ok(Json(StatsResponse::new(state.service.stats(), entries)))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
