//! Loaders that turn a query into a cacheable value.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::ListQuery;
use crate::client::PageSource;
use crate::error::Result;
use crate::models::{DashboardSummary, EntityKind, RecordPage, SUMMARY_ENDPOINT};

/// Produces the value a store caches for a query.
#[async_trait]
pub trait Fetch<V>: Send + Sync {
    async fn fetch(&self, query: &ListQuery) -> Result<V>;
}

/// Fetches and normalizes one page of an entity list.
pub struct EntityFetcher {
    kind: EntityKind,
    source: Arc<dyn PageSource>,
}

impl EntityFetcher {
    pub fn new(kind: EntityKind, source: Arc<dyn PageSource>) -> Self {
        Self { kind, source }
    }
}

#[async_trait]
impl Fetch<RecordPage> for EntityFetcher {
    async fn fetch(&self, query: &ListQuery) -> Result<RecordPage> {
        let body = self
            .source
            .get_json(self.kind.endpoint(), &query.query_pairs())
            .await?;
        RecordPage::from_response(self.kind, &body, query)
    }
}

/// Fetches the dashboard counters; the query is ignored.
pub struct SummaryFetcher {
    source: Arc<dyn PageSource>,
}

impl SummaryFetcher {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Fetch<DashboardSummary> for SummaryFetcher {
    async fn fetch(&self, _query: &ListQuery) -> Result<DashboardSummary> {
        let body = self.source.get_json(SUMMARY_ENDPOINT, &[]).await?;
        DashboardSummary::from_response(&body)
    }
}
