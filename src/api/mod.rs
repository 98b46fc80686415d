//! API Module
//!
//! HTTP handlers and routing for the local console API.
//!
//! # Endpoints
//! - `GET /api/:entity` - Cached page of an entity list
//! - `POST /api/:entity/refresh` - Force a refetch
//! - `DELETE /api/:entity/cache` - Clear one store
//! - `GET /api/:entity/events` - Change notifications
//! - `GET /api/dashboard/summary` - Dashboard counters
//! - `GET /api/dashboard/events` - Dashboard change notifications
//! - `DELETE /cache` - Clear every store
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
