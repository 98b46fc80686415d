//! Upstream Client Module
//!
//! Access to the remote loan-origination API. Stores depend only on the
//! `PageSource` trait so they can be driven by scripted sources in tests.

mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use http::{ApiClient, ClientBuilder};

/// Something that answers GET requests with JSON bodies.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Issues a GET for `path` (relative to the API base) with the given query pairs.
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> Result<Value>;
}
