//! Dashboard summary counters

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{ConsoleError, Result};

/// Remote path of the dashboard summary.
pub const SUMMARY_ENDPOINT: &str = "dashboard/summary";

/// Headline counters shown on the console landing page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Counter name to value, as named by the server
    pub counts: BTreeMap<String, u64>,
}

impl DashboardSummary {
    /// Collects every non-negative integer field of the body (or of its `data` object).
    pub fn from_response(body: &Value) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| ConsoleError::Decode("dashboard summary is not an object".into()))?;
        let source = object
            .get("data")
            .and_then(Value::as_object)
            .unwrap_or(object);

        Ok(Self {
            counts: collect_counts(source),
        })
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

fn collect_counts(object: &Map<String, Value>) -> BTreeMap<String, u64> {
    object
        .iter()
        .filter_map(|(key, value)| {
            let count = match value {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            }?;
            Some((key.clone(), count))
        })
        .collect()
}
