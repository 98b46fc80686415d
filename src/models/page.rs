//! Paginated list envelopes
//!
//! Accepts the handful of shapes the remote API answers list queries with.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::ListQuery;
use crate::error::{ConsoleError, Result};
use crate::models::{normalize, EntityKind, Record};

const LIST_FIELDS: &[&str] = &["data", "items", "result", "results"];
const TOTAL_FIELDS: &[&str] = &["total", "totalCount", "count"];
const PAGE_FIELDS: &[&str] = &["page", "currentPage"];
const TOTAL_PAGES_FIELDS: &[&str] = &["totalPages", "pages"];

/// One page of normalized records with pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    pub records: Vec<Record>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

impl RecordPage {
    /// Decodes a list response for `kind`, filling missing metadata from `query`.
    pub fn from_response(kind: EntityKind, body: &Value, query: &ListQuery) -> Result<Self> {
        let (items, meta) = split_envelope(body).ok_or_else(|| {
            ConsoleError::Decode(format!(
                "{} response has no record list (got {})",
                kind,
                shape_of(body)
            ))
        })?;

        let records: Vec<Record> = items.iter().map(|item| normalize(kind, item)).collect();

        let total = meta
            .and_then(|m| lookup_u64(m, TOTAL_FIELDS))
            .unwrap_or(records.len() as u64);
        let page = meta
            .and_then(|m| lookup_u64(m, PAGE_FIELDS))
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(query.page);
        let total_pages = meta
            .and_then(|m| lookup_u64(m, TOTAL_PAGES_FIELDS))
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or_else(|| pages_for(total, query.limit))
            .max(1);

        Ok(Self {
            records,
            total,
            page,
            total_pages,
        })
    }
}

/// Locates the record array and the object carrying pagination metadata.
fn split_envelope(body: &Value) -> Option<(&Vec<Value>, Option<&Map<String, Value>>)> {
    match body {
        Value::Array(items) => Some((items, None)),
        Value::Object(object) => {
            if let Some(items) = find_list(object) {
                return Some((items, Some(object)));
            }
            // `{ "data": { "items": [...], "total": n } }`
            let inner = object.get("data")?.as_object()?;
            find_list(inner).map(|items| (items, Some(inner)))
        }
        _ => None,
    }
}

fn find_list(object: &Map<String, Value>) -> Option<&Vec<Value>> {
    LIST_FIELDS
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_array))
}

fn lookup_u64(object: &Map<String, Value>, fields: &[&str]) -> Option<u64> {
    fields.iter().find_map(|field| match object.get(*field)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn pages_for(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
