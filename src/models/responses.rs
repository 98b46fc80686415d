//! Response DTOs for the console API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheStats, ReadOutcome};
use crate::models::{DashboardSummary, EntityKind, Record, RecordPage};

/// Response body for list reads (GET /api/:entity)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub entity: EntityKind,
    /// Composite cache key the page is stored under
    pub key: String,
    /// True when the page is older than the staleness window and a refresh is underway
    pub stale: bool,
    pub records: Vec<Record>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    pub fetched_at: DateTime<Utc>,
}

impl ListResponse {
    /// Creates a ListResponse from a store read
    pub fn new(entity: EntityKind, key: String, outcome: ReadOutcome<RecordPage>) -> Self {
        let stale = outcome.is_stale();
        let (page, fetched_at) = outcome.into_parts();
        Self {
            entity,
            key,
            stale,
            records: page.records,
            total: page.total,
            page: page.page,
            total_pages: page.total_pages,
            fetched_at,
        }
    }
}

/// Response body for the dashboard summary (GET /api/dashboard/summary)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub stale: bool,
    pub total: u64,
    pub counts: BTreeMap<String, u64>,
    pub fetched_at: DateTime<Utc>,
}

impl SummaryResponse {
    pub fn new(summary: DashboardSummary, stale: bool, fetched_at: DateTime<Utc>) -> Self {
        Self {
            stale,
            total: summary.total(),
            counts: summary.counts,
            fetched_at,
        }
    }
}

/// Response body for cache clearing (DELETE /cache, DELETE /api/:entity/cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
    /// Slugs of the stores that were cleared
    pub cleared: Vec<String>,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new(cleared: Vec<String>) -> Self {
        Self {
            message: format!("Cleared {} cache store(s)", cleared.len()),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Per-store statistics keyed by entity slug (plus `dashboard`)
    pub stores: BTreeMap<String, StoreStats>,
    /// Hit rate across every store
    pub hit_rate: f64,
}

/// Statistics for one store
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from per-store statistics
    pub fn new(stats: BTreeMap<String, CacheStats>) -> Self {
        let (hits, misses) = stats
            .values()
            .fold((0u64, 0u64), |(h, m), s| (h + s.hits, m + s.misses));
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        let stores = stats
            .into_iter()
            .map(|(slug, stats)| {
                let hit_rate = stats.hit_rate();
                (slug, StoreStats { stats, hit_rate })
            })
            .collect();
        Self { stores, hit_rate }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
