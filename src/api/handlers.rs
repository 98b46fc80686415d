//! API Handlers
//!
//! HTTP request handlers through which console pages read the caches.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio::sync::broadcast;
use tokio_stream::{wrappers::BroadcastStream, Stream, StreamExt};

use crate::cache::{CacheEvent, CacheRegistry, ListQuery};
use crate::client::PageSource;
use crate::error::{ConsoleError, Result};
use crate::models::{
    ClearResponse, HealthResponse, ListParams, ListResponse, StatsResponse, SummaryResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Every cache store of the console
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: CacheRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Creates a new AppState from configuration and an upstream source.
    pub fn from_config(config: &crate::config::Config, source: Arc<dyn PageSource>) -> Self {
        Self::new(CacheRegistry::new(source, config.cache_settings()))
    }

    fn query_from(
        &self,
        params: std::result::Result<Query<ListParams>, QueryRejection>,
    ) -> Result<ListQuery> {
        let Query(params) =
            params.map_err(|rejection| ConsoleError::InvalidRequest(rejection.body_text()))?;
        if let Some(error_msg) = params.validate() {
            return Err(ConsoleError::InvalidRequest(error_msg));
        }
        Ok(params.into_query(self.registry.settings().default_page_size))
    }
}

/// Handler for GET /api/:entity
///
/// Stale-while-revalidate read of one page.
pub async fn list_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>> {
    let (kind, store) = state.registry.store_by_slug(&entity)?;
    let query = state.query_from(params)?;

    let outcome = store.read(&query).await?;

    Ok(Json(ListResponse::new(kind, query.cache_key(), outcome)))
}

/// Handler for POST /api/:entity/refresh
///
/// Forces a network fetch for one page.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    params: std::result::Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse>> {
    let (kind, store) = state.registry.store_by_slug(&entity)?;
    let query = state.query_from(params)?;

    let outcome = store.refresh(&query).await?;

    Ok(Json(ListResponse::new(kind, query.cache_key(), outcome)))
}

/// Handler for DELETE /api/:entity/cache
pub async fn clear_entity_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<Json<ClearResponse>> {
    let (_, store) = state.registry.store_by_slug(&entity)?;
    store.clear().await;

    Ok(Json(ClearResponse::new(vec![store.label().to_string()])))
}

/// Maps store notifications onto SSE frames named after the change.
///
/// Notifications a slow client missed are skipped.
fn event_stream(
    receiver: broadcast::Receiver<CacheEvent>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(receiver).filter_map(|message| {
        let event = message.ok()?;
        Event::default()
            .event(event.change.as_str())
            .json_data(&event)
            .ok()
            .map(Ok)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handler for GET /api/:entity/events
///
/// Server-sent events carrying every change notification of one store.
pub async fn events_handler(
    State(state): State<AppState>,
    Path(entity): Path<String>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let (_, store) = state.registry.store_by_slug(&entity)?;
    Ok(event_stream(store.subscribe()))
}

/// Handler for GET /api/dashboard/events
pub async fn summary_events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    event_stream(state.registry.summary().subscribe())
}

/// Handler for GET /api/dashboard/summary
pub async fn summary_handler(State(state): State<AppState>) -> Result<Json<SummaryResponse>> {
    let outcome = state.registry.summary().read(&ListQuery::default()).await?;
    let stale = outcome.is_stale();
    let (summary, fetched_at) = outcome.into_parts();

    Ok(Json(SummaryResponse::new(summary, stale, fetched_at)))
}

/// Handler for DELETE /cache
///
/// Clears every store and stops every refresh timer.
pub async fn clear_all_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.registry.clear_all().await;
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::new(state.registry.stats().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
