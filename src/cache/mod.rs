//! Cache Module
//!
//! Per-entity read-through caches with a fixed staleness window, polling
//! refresh per query key, and change notifications.

mod entry;
mod events;
mod fetch;
mod key;
mod registry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use entry::{CacheEntry, Freshness, ReadOutcome};
pub use events::{CacheEvent, ChangeKind};
pub use fetch::{EntityFetcher, Fetch, SummaryFetcher};
pub use key::{ListQuery, DEFAULT_PAGE_SIZE};
pub use registry::{CacheRegistry, SUMMARY_LABEL};
pub use stats::CacheStats;
pub use store::{CacheStore, EntityStore, SummaryCache};

/// Tuning shared by every store.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Entries at least this old are stale
    pub stale_after: Duration,
    /// Period of the per-key refresh timer; zero disables timers
    pub refresh_interval: Duration,
    /// Page size for queries that do not name one
    pub default_page_size: u32,
    /// Buffered notifications per store
    pub event_capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(60),
            refresh_interval: Duration::from_secs(60),
            default_page_size: DEFAULT_PAGE_SIZE,
            event_capacity: 64,
        }
    }
}
