//! Domain and transport models for the console
//!
//! Entity kinds, normalized records, list envelopes, and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod dashboard;
pub mod entity;
pub mod page;
pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use dashboard::{DashboardSummary, SUMMARY_ENDPOINT};
pub use entity::EntityKind;
pub use page::RecordPage;
pub use record::{normalize, ApplicationStatus, Record};
pub use requests::ListParams;
pub use responses::{
    ClearResponse, ErrorResponse, HealthResponse, ListResponse, StatsResponse, SummaryResponse,
};
