//! One store per entity kind, plus the dashboard summary.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cache::{
    CacheSettings, CacheStats, EntityFetcher, EntityStore, SummaryCache, SummaryFetcher,
};
use crate::client::PageSource;
use crate::error::{ConsoleError, Result};
use crate::models::EntityKind;

/// Label of the dashboard summary store in stats and events.
pub const SUMMARY_LABEL: &str = "dashboard";

/// Owns every cache store of the console.
pub struct CacheRegistry {
    stores: BTreeMap<EntityKind, Arc<EntityStore>>,
    summary: Arc<SummaryCache>,
    settings: CacheSettings,
}

impl CacheRegistry {
    /// Builds a store for every entity kind, all reading from `source`.
    pub fn new(source: Arc<dyn PageSource>, settings: CacheSettings) -> Self {
        let stores = EntityKind::ALL
            .into_iter()
            .map(|kind| {
                let fetcher = Arc::new(EntityFetcher::new(kind, Arc::clone(&source)));
                (kind, EntityStore::new(kind.slug(), fetcher, settings.clone()))
            })
            .collect();

        let summary = SummaryCache::new(
            SUMMARY_LABEL,
            Arc::new(SummaryFetcher::new(source)),
            settings.clone(),
        );

        Self {
            stores,
            summary,
            settings,
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// The store for `kind`.
    pub fn store(&self, kind: EntityKind) -> Arc<EntityStore> {
        // Every kind is registered in `new`
        Arc::clone(&self.stores[&kind])
    }

    /// Resolves a URL slug to its store.
    pub fn store_by_slug(&self, slug: &str) -> Result<(EntityKind, Arc<EntityStore>)> {
        let kind = EntityKind::from_slug(slug)
            .ok_or_else(|| ConsoleError::UnknownEntity(slug.to_string()))?;
        Ok((kind, self.store(kind)))
    }

    pub fn summary(&self) -> Arc<SummaryCache> {
        Arc::clone(&self.summary)
    }

    /// Clears every store and stops every refresh timer.
    ///
    /// Returns the labels of the cleared stores.
    pub async fn clear_all(&self) -> Vec<String> {
        let mut cleared = Vec::with_capacity(self.stores.len() + 1);
        for store in self.stores.values() {
            store.clear().await;
            cleared.push(store.label().to_string());
        }
        self.summary.clear().await;
        cleared.push(SUMMARY_LABEL.to_string());
        cleared
    }

    /// Statistics of every store keyed by label.
    pub async fn stats(&self) -> BTreeMap<String, CacheStats> {
        let mut stats = BTreeMap::new();
        for store in self.stores.values() {
            stats.insert(store.label().to_string(), store.stats().await);
        }
        stats.insert(SUMMARY_LABEL.to_string(), self.summary.stats().await);
        stats
    }
}
