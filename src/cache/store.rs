//! Cache Store Module
//!
//! Read-through store combining a keyed HashMap with a fixed staleness
//! window, one background refresh timer per key, and change broadcast.
//!
//! In-flight fetches are not de-duplicated: two misses on the same key issue
//! two upstream requests, and the later response wins.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{
    CacheEntry, CacheEvent, CacheSettings, CacheStats, ChangeKind, Fetch, Freshness, ListQuery,
    ReadOutcome,
};
use crate::error::Result;
use crate::models::{DashboardSummary, RecordPage};
use crate::tasks::spawn_refresh_task;

/// Store for one entity list.
pub type EntityStore = CacheStore<RecordPage>;

/// Store for the dashboard counters.
pub type SummaryCache = CacheStore<DashboardSummary>;

#[derive(Debug)]
struct StoreState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    stats: CacheStats,
}

// == Cache Store ==
/// Memoizes query results and keeps them warm.
pub struct CacheStore<V> {
    /// Name used in logs and events
    label: String,
    fetcher: Arc<dyn Fetch<V>>,
    settings: CacheSettings,
    state: RwLock<StoreState<V>>,
    /// Refresh timers by composite key
    refreshers: Mutex<HashMap<String, JoinHandle<()>>>,
    events: broadcast::Sender<CacheEvent>,
}

impl<V> CacheStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    pub fn new(
        label: impl Into<String>,
        fetcher: Arc<dyn Fetch<V>>,
        settings: CacheSettings,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(settings.event_capacity.max(1));
        Arc::new(Self {
            label: label.into(),
            fetcher,
            settings,
            state: RwLock::new(StoreState {
                entries: HashMap::new(),
                stats: CacheStats::new(),
            }),
            refreshers: Mutex::new(HashMap::new()),
            events,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    // == Get ==
    /// Returns the cached value only while it is fresh.
    ///
    /// Never touches the network. Counts a hit or a miss.
    pub async fn get(&self, query: &ListQuery) -> Option<V> {
        self.lookup(&query.cache_key())
            .await
            .filter(|outcome| !outcome.is_stale())
            .map(|outcome| outcome.value)
    }

    // == Peek ==
    /// Returns whatever is cached, stale or not, without counting the read.
    pub async fn peek(&self, query: &ListQuery) -> Option<ReadOutcome<V>> {
        let state = self.state.read().await;
        state
            .entries
            .get(&query.cache_key())
            .map(|entry| ReadOutcome::from_entry(entry, self.freshness_of(entry)))
    }

    // == Fetch ==
    /// Read-through: the fresh cached value, or a network fetch.
    pub async fn fetch(self: &Arc<Self>, query: &ListQuery) -> Result<V> {
        match self.lookup(&query.cache_key()).await {
            Some(outcome) if !outcome.is_stale() => Ok(outcome.value),
            _ => self.load(query).await.map(|outcome| outcome.value),
        }
    }

    // == Refresh ==
    /// Fetches from the network regardless of what is cached.
    pub async fn refresh(self: &Arc<Self>, query: &ListQuery) -> Result<ReadOutcome<V>> {
        self.load(query).await
    }

    // == Read ==
    /// Stale-while-revalidate read.
    ///
    /// A fresh entry is returned as is. A stale entry is returned immediately
    /// while a background fetch replaces it. A missing entry is fetched before
    /// returning.
    pub async fn read(self: &Arc<Self>, query: &ListQuery) -> Result<ReadOutcome<V>> {
        match self.lookup(&query.cache_key()).await {
            Some(outcome) if outcome.is_stale() => {
                self.revalidate(query.clone());
                Ok(outcome)
            }
            Some(outcome) => Ok(outcome),
            None => self.load(query).await,
        }
    }

    // == Invalidate ==
    /// Drops one key. Its refresh timer keeps running and will repopulate it.
    pub async fn invalidate(&self, query: &ListQuery) -> bool {
        let key = query.cache_key();
        let removed = self.state.write().await.entries.remove(&key).is_some();
        if removed {
            self.notify(Some(key), ChangeKind::Invalidated);
        }
        removed
    }

    // == Clear ==
    /// Drops every entry and stops every refresh timer.
    ///
    /// Returns the number of entries removed. Fetches already in flight are not
    /// cancelled and may repopulate their key when they land.
    pub async fn clear(&self) -> usize {
        let removed = {
            let mut state = self.state.write().await;
            let count = state.entries.len();
            state.entries.clear();
            count
        };

        let stopped = {
            let mut refreshers = self.refreshers.lock().await;
            let count = refreshers.len();
            for (_, handle) in refreshers.drain() {
                handle.abort();
            }
            count
        };

        info!(
            store = %self.label,
            entries = removed,
            timers = stopped,
            "Cache cleared"
        );
        self.notify(None, ChangeKind::Cleared);
        removed
    }

    // == Subscribe ==
    /// Receives every change notification from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let mut stats = {
            let state = self.state.read().await;
            let mut stats = state.stats.clone();
            stats.total_entries = state.entries.len();
            stats
        };
        stats.active_refreshers = self.active_refreshers().await;
        stats
    }

    pub async fn active_refreshers(&self) -> usize {
        self.refreshers
            .lock()
            .await
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    // == Internals ==

    fn freshness_of(&self, entry: &CacheEntry<V>) -> Freshness {
        if entry.is_stale(self.settings.stale_after) {
            Freshness::Stale
        } else {
            Freshness::Fresh
        }
    }

    /// Cached lookup that records a hit for fresh entries and a miss otherwise.
    async fn lookup(&self, key: &str) -> Option<ReadOutcome<V>> {
        let mut state = self.state.write().await;
        let outcome = state
            .entries
            .get(key)
            .map(|entry| ReadOutcome::from_entry(entry, self.freshness_of(entry)));

        match &outcome {
            Some(found) if !found.is_stale() => {
                state.stats.record_hit();
                debug!(store = %self.label, key, "Cache hit");
            }
            _ => state.stats.record_miss(),
        }
        outcome
    }

    /// Network fetch, store, notify, and make sure the key has a timer.
    async fn load(self: &Arc<Self>, query: &ListQuery) -> Result<ReadOutcome<V>> {
        let key = query.cache_key();
        self.state.write().await.stats.record_fetch();

        let value = match self.fetcher.fetch(query).await {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    store = %self.label,
                    key = %key,
                    error = %err,
                    "Fetch failed, keeping cached entry"
                );
                self.state.write().await.stats.record_fetch_failure();
                return Err(err);
            }
        };

        let entry = CacheEntry::new(value);
        let outcome = ReadOutcome::from_entry(&entry, Freshness::Fetched);
        self.state.write().await.entries.insert(key.clone(), entry);
        debug!(store = %self.label, key = %key, "Cache entry stored");

        self.notify(Some(key.clone()), ChangeKind::Updated);
        self.ensure_refresher(key, query).await;
        Ok(outcome)
    }

    fn revalidate(self: &Arc<Self>, query: ListQuery) {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            // Failures are logged by load; the stale entry stays in place
            let _ = store.load(&query).await;
        });
    }

    async fn ensure_refresher(self: &Arc<Self>, key: String, query: &ListQuery) {
        if self.settings.refresh_interval.is_zero() {
            return;
        }

        let mut refreshers = self.refreshers.lock().await;
        if refreshers
            .get(&key)
            .is_some_and(|handle| !handle.is_finished())
        {
            return;
        }

        let handle = spawn_refresh_task(
            Arc::downgrade(self),
            query.clone(),
            self.settings.refresh_interval,
        );
        refreshers.insert(key, handle);
    }

    fn notify(&self, key: Option<String>, change: ChangeKind) {
        // Err only means nobody is subscribed
        let _ = self.events.send(CacheEvent {
            store: self.label.clone(),
            key,
            change,
        });
    }
}

impl<V> Drop for CacheStore<V> {
    fn drop(&mut self) {
        for (_, handle) in self.refreshers.get_mut().drain() {
            handle.abort();
        }
    }
}
