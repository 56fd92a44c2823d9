//! Latest-state publisher
//!
//! A single-writer, multi-reader cell holding the most recent successfully
//! decoded document. Each successful reassembly overwrites the value
//! wholesale; no history is retained. Document and timestamp are read under
//! one lock guard so a reader never observes a stale document with a fresh
//! timestamp.

use parking_lot::RwLock;
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug)]
struct PublishedState {
    document: Value,
    published_at: SystemTime,
}

/// Consistent read of the published state
#[derive(Debug, Clone)]
pub struct StateSnapshot {
    pub document: Value,
    /// Publish instant as unix seconds
    pub unix_timestamp: f64,
    /// Wall-clock elapsed since publish, recomputed on every read
    pub age_ms: u64,
}

/// Cell holding the single most recent published document
pub struct StateCell {
    inner: RwLock<Option<PublishedState>>,
}

impl StateCell {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    /// Replace the published document wholesale, stamping it with now.
    /// Written only by the reassembly completion path.
    pub fn publish(&self, document: Value) {
        let mut guard = self.inner.write();
        *guard = Some(PublishedState {
            document,
            published_at: SystemTime::now(),
        });
    }

    /// Snapshot the document and timestamp together, or `None` before the
    /// first publish.
    pub fn snapshot(&self) -> Option<StateSnapshot> {
        let guard = self.inner.read();
        guard.as_ref().map(|state| {
            let unix_timestamp = state
                .published_at
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs_f64();
            // Clamped to zero if the clock steps backwards between publish
            // and read.
            let age_ms = SystemTime::now()
                .duration_since(state.published_at)
                .unwrap_or_default()
                .as_millis() as u64;
            StateSnapshot {
                document: state.document.clone(),
                unix_timestamp,
                age_ms,
            }
        })
    }

    pub fn has_state(&self) -> bool {
        self.inner.read().is_some()
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}
