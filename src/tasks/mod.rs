//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the console is up.
//!
//! # Tasks
//! - Query refresh: re-fetches one cached query key at a fixed interval

mod refresh;

pub use refresh::spawn_refresh_task;
