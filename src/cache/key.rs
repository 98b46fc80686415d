//! Composite query keys
//!
//! A list query is addressed by its pagination, search and status filter.
//! The same normalized query always maps to the same key string.

use url::form_urlencoded;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A paginated, filtered list query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
    /// Trimmed free-text search, None when blank
    pub search: Option<String>,
    /// Status filter, None for "all"
    pub status: Option<String>,
}

impl ListQuery {
    /// Creates a normalized query.
    ///
    /// Page and limit are clamped to at least 1, blank search is dropped, and
    /// a blank or `all` status means no filter.
    pub fn new(page: u32, limit: u32, search: Option<String>, status: Option<String>) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let status = status
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));

        Self {
            page: page.max(1),
            limit: limit.max(1),
            search,
            status,
        }
    }

    /// The composite key this query's results are cached under.
    pub fn cache_key(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string())
            .append_pair("search", self.search.as_deref().unwrap_or(""))
            .append_pair("status", self.status.as_deref().unwrap_or(""))
            .finish()
    }

    /// Query-string parameters sent to the remote API.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        pairs
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, None, None)
    }
}
