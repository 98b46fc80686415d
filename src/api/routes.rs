//! API Routes
//!
//! Configures the Axum router with all console endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_all_handler, clear_entity_handler, events_handler, health_handler, list_handler,
    refresh_handler, stats_handler, summary_events_handler, summary_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/dashboard/summary` - Dashboard counters
/// - `GET /api/dashboard/events` - Dashboard change notifications (SSE)
/// - `GET /api/:entity` - Cached page of an entity list
/// - `POST /api/:entity/refresh` - Force a refetch of one page
/// - `DELETE /api/:entity/cache` - Clear one store
/// - `GET /api/:entity/events` - Change notifications (SSE)
/// - `DELETE /cache` - Clear every store
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the console UI is served from elsewhere
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/dashboard/summary", get(summary_handler))
        .route("/api/dashboard/events", get(summary_events_handler))
        .route("/api/:entity", get(list_handler))
        .route("/api/:entity/refresh", post(refresh_handler))
        .route("/api/:entity/cache", delete(clear_entity_handler))
        .route("/api/:entity/events", get(events_handler))
        .route("/cache", delete(clear_all_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
