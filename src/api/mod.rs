//! API Module
//!
//! HTTP handlers and routing for the cache service REST API.
//!
//! # Endpoints
//! - `GET /keys` - List a page of key/value pairs
//! - `DELETE /keys` - Remove every entry
//! - `GET /keys/:key` - Read a value by key, filling the cache on a miss
//! - `PUT /keys/:key` - Store a value under a key
//! - `DELETE /keys/:key` - Remove a key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
