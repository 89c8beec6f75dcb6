//! In-process download/view counters and their key scheme.

use std::collections::HashSet;

use dashmap::DashMap;
use tracing::trace;

use osf_core::traits::counter::{CounterSnapshot, DownloadCounter};
use osf_core::types::ProjectId;

/// Key of a per-file (and optionally per-version) download counter.
pub fn download_key(scope: ProjectId, file_key: &str, version: Option<usize>) -> String {
    match version {
        Some(v) => format!("download:{scope}:{file_key}:{v}"),
        None => format!("download:{scope}:{file_key}"),
    }
}

/// Key of a per-node page view counter.
pub fn view_key(scope: ProjectId) -> String {
    format!("node:{scope}")
}

#[derive(Debug, Default)]
struct CounterEntry {
    total: u64,
    visitors: HashSet<String>,
}

/// Counter service kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryDownloadCounter {
    entries: DashMap<String, CounterEntry>,
}

impl InMemoryDownloadCounter {
    /// Create an empty counter store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DownloadCounter for InMemoryDownloadCounter {
    fn increment(&self, key: &str, visitor: &str) {
        let mut entry = self.entries.entry(key.to_string()).or_default();
        entry.total += 1;
        if !entry.visitors.contains(visitor) {
            entry.visitors.insert(visitor.to_string());
        }
        trace!(key, total = entry.total, "Counter incremented");
    }

    fn get(&self, key: &str) -> CounterSnapshot {
        self.entries
            .get(key)
            .map(|e| CounterSnapshot {
                unique: e.visitors.len() as u64,
                total: e.total,
            })
            .unwrap_or_default()
    }
}
