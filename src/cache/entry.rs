//! Cache Entry Module
//!
//! Defines a stored fetch result together with the time it was fetched.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// A fetched value and its fetch timestamps.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub value: T,
    /// Monotonic fetch time, used for staleness checks
    pub fetched_at: Instant,
    /// Wall-clock fetch time, reported to callers
    pub fetched_at_utc: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(value: T) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
            fetched_at_utc: Utc::now(),
        }
    }

    // == Age ==
    pub fn age(&self) -> Duration {
        self.fetched_at.elapsed()
    }

    // == Is Stale ==
    /// Checks whether the entry has outlived the staleness window.
    ///
    /// Boundary condition: an entry is stale once its age is greater than or
    /// equal to the window, so a zero window makes every entry stale.
    pub fn is_stale(&self, window: Duration) -> bool {
        self.age() >= window
    }
}

// == Read Outcome ==
/// How a read was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Served from cache within the staleness window
    Fresh,
    /// Served from cache past the window; a revalidation was started
    Stale,
    /// Served from a network fetch made for this read
    Fetched,
}

/// A value handed out by a store, with its provenance.
#[derive(Debug, Clone)]
pub struct ReadOutcome<T> {
    pub value: T,
    pub fetched_at: DateTime<Utc>,
    pub freshness: Freshness,
}

impl<T> ReadOutcome<T> {
    pub(crate) fn from_entry(entry: &CacheEntry<T>, freshness: Freshness) -> Self
    where
        T: Clone,
    {
        Self {
            value: entry.value.clone(),
            fetched_at: entry.fetched_at_utc,
            freshness,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }

    pub fn into_parts(self) -> (T, DateTime<Utc>) {
        (self.value, self.fetched_at)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_within_window() {
        let entry = CacheEntry::new("value");

        tokio::time::advance(Duration::from_secs(59)).await;

        assert!(!entry.is_stale(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_stale_at_window_boundary() {
        let entry = CacheEntry::new("value");

        tokio::time::advance(Duration::from_secs(60)).await;

        assert!(entry.is_stale(Duration::from_secs(60)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_window_is_always_stale() {
        let entry = CacheEntry::new(1u8);
        assert!(entry.is_stale(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_read_outcome_parts() {
        let entry = CacheEntry::new(vec![1, 2]);
        let outcome = ReadOutcome::from_entry(&entry, Freshness::Stale);
        assert!(outcome.is_stale());
        let (value, fetched_at) = outcome.into_parts();
        assert_eq!(value, vec![1, 2]);
        assert_eq!(fetched_at, entry.fetched_at_utc);
    }
}
