//! Download/view counter collaborator.
//!
//! Counters are keyed by colon-separated strings such as
//! `download:{project}:{file_key}:{version}`. Increments are
//! fire-and-forget: implementations must never fail the caller.

use serde::{Deserialize, Serialize};

/// Point-in-time reading of one counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    /// Number of distinct visitors that hit the counter.
    pub unique: u64,
    /// Total number of hits.
    pub total: u64,
}

/// Injected counter service used for download and view analytics.
pub trait DownloadCounter: Send + Sync + std::fmt::Debug + 'static {
    /// Record one hit on `key` by `visitor`.
    fn increment(&self, key: &str, visitor: &str);

    /// Read the current value of `key`; unknown keys read as zero.
    fn get(&self, key: &str) -> CounterSnapshot;
}
