//! Change notifications fanned out to subscribers.

use serde::Serialize;

/// What happened to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A key received freshly fetched data
    Updated,
    /// A single key was dropped
    Invalidated,
    /// Every key was dropped and timers stopped
    Cleared,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Updated => "updated",
            ChangeKind::Invalidated => "invalidated",
            ChangeKind::Cleared => "cleared",
        }
    }
}

/// A change notification from one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheEvent {
    /// Store label (entity slug, or `dashboard`)
    pub store: String,
    /// Affected composite key; None for whole-store changes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub change: ChangeKind,
}
