//! Loan Console - data caches for the loan-origination admin console
//!
//! Per-entity read-through caches with a staleness window, polling refresh
//! per query key, and change notifications, in front of the remote API.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheRegistry, ListQuery};
pub use client::{ApiClient, PageSource};
pub use config::Config;
pub use error::{ConsoleError, Result};
