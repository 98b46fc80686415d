//! Query Refresh Task
//!
//! Background task that periodically re-fetches one cached query.

use std::sync::Weak;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheStore, ListQuery};

/// Spawns a background task that re-fetches `query` every `interval`.
///
/// The task holds only a weak reference to the store: it ends on its own once
/// the store is dropped, and the store aborts it on `clear()`. A failed tick is
/// logged by the store and the loop carries on.
///
/// # Arguments
/// * `store` - Weak reference to the owning store
/// * `query` - The query whose key this timer keeps warm
/// * `interval` - Time between refreshes
///
/// # Returns
/// A JoinHandle for the spawned task, which the store keeps so it can abort
/// the task when the cache is cleared.
pub fn spawn_refresh_task<V>(
    store: Weak<CacheStore<V>>,
    query: ListQuery,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let key = query.cache_key();
        debug!(
            key = %key,
            interval_secs = interval.as_secs(),
            "Starting refresh task"
        );

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(interval).await;

            let Some(store) = store.upgrade() else {
                info!(key = %key, "Store dropped, stopping refresh task");
                break;
            };

            if store.refresh(&query).await.is_ok() {
                debug!(store = store.label(), key = %key, "Background refresh complete");
            }
        }
    })
}
