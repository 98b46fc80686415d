//! Request DTOs for the console API
//!
//! Defines the query-string parameters accepted by list endpoints.

use serde::Deserialize;

use crate::cache::ListQuery;

/// Largest page size the console will forward upstream.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query parameters for list, refresh and summary reads
///
/// # Fields
/// - `page`: 1-based page number (default 1)
/// - `limit`: page size (default from configuration)
/// - `search`: free-text search
/// - `status`: status filter (`all` means no filter)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListParams {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.page == Some(0) {
            return Some("page starts at 1".to_string());
        }
        match self.limit {
            Some(0) => Some("limit must be positive".to_string()),
            Some(limit) if limit > MAX_PAGE_SIZE => Some(format!(
                "limit exceeds maximum page size of {}",
                MAX_PAGE_SIZE
            )),
            _ => None,
        }
    }

    /// Builds the normalized query, using `default_limit` when none was given.
    pub fn into_query(self, default_limit: u32) -> ListQuery {
        ListQuery::new(
            self.page.unwrap_or(1),
            self.limit.unwrap_or(default_limit),
            self.search,
            self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_deserialize() {
        let json = r#"{"page": 2, "search": "rao"}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page, Some(2));
        assert!(params.limit.is_none());
        assert_eq!(params.search.as_deref(), Some("rao"));
    }

    #[test]
    fn test_validate_rejects_zero_page() {
        let params = ListParams {
            page: Some(0),
            ..ListParams::default()
        };
        assert!(params.validate().is_some());
    }

    #[test]
    fn test_validate_rejects_oversized_limit() {
        let params = ListParams {
            limit: Some(MAX_PAGE_SIZE + 1),
            ..ListParams::default()
        };
        assert!(params.validate().is_some());
    }

    #[test]
    fn test_into_query_applies_default_limit() {
        let query = ListParams::default().into_query(25);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 25);
        assert!(query.search.is_none());
    }
}
