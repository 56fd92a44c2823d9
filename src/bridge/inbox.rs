//! Time-bounded partial-message reassembly buffer
//!
//! One `ChunkInbox` instance is shared by all chunk-ingress handlers. A
//! single mutex guards the whole pending-message map: every ingest call is
//! one critical section covering the expiry sweep, the lookup-or-create, the
//! conflict check, the index write, and the completion check, so concurrent
//! deliveries for one id can neither lose an index nor both observe
//! completion.

use crate::bridge::types::{
    Base64Fragment, ChunkIndex, ChunkTotal, IntegrityTag, MessageId, PENDING_MESSAGE_TTL,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One in-flight message: the chunks seen so far plus the metadata declared
/// by the first chunk.
#[derive(Debug)]
struct PendingMessage {
    expected_count: ChunkTotal,
    integrity_tag: IntegrityTag,
    parts: HashMap<ChunkIndex, Base64Fragment>,
    last_touched: Instant,
}

impl PendingMessage {
    fn new(expected_count: ChunkTotal, integrity_tag: IntegrityTag, now: Instant) -> Self {
        Self {
            expected_count,
            integrity_tag,
            parts: HashMap::new(),
            last_touched: now,
        }
    }
}

/// Result of ingesting one chunk
#[derive(Debug, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Chunk stored; the message is still incomplete
    Stored,
    /// Declared total or integrity tag disagreed with the in-flight entry;
    /// the whole entry was dropped and this chunk discarded
    Conflict,
    /// All indices present; the entry was removed and the fragments
    /// concatenated in index order
    Complete(String),
}

/// Reassembly buffer for in-flight chunked messages
pub struct ChunkInbox {
    ttl: Duration,
    pending: Mutex<HashMap<MessageId, PendingMessage>>,
}

impl ChunkInbox {
    pub fn new() -> Self {
        Self::with_ttl(PENDING_MESSAGE_TTL)
    }

    /// Create an inbox with a custom TTL (tests shrink it to avoid waiting
    /// out the 20s production value).
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Accept one chunk.
    ///
    /// Runs the lazy expiry sweep, then applies the chunk to its entry. On
    /// the final chunk the assembled base64 string is returned and the entry
    /// removed; decoding happens in the caller, outside the lock.
    pub fn ingest(
        &self,
        id: &MessageId,
        tag: &IntegrityTag,
        index: ChunkIndex,
        total: ChunkTotal,
        fragment: Base64Fragment,
    ) -> IngestOutcome {
        let now = Instant::now();
        let mut pending = self.pending.lock();

        // Lazy sweep: growth is bounded by actual ingress traffic, no
        // background timer involved.
        let ttl = self.ttl;
        pending.retain(|_, message| now.duration_since(message.last_touched) <= ttl);

        let entry = pending
            .entry(id.clone())
            .or_insert_with(|| PendingMessage::new(total, tag.clone(), now));

        if entry.expected_count != total || entry.integrity_tag != *tag {
            // Sender restarted or two senders collide on one id: drop the
            // whole entry, and this chunk with it.
            pending.remove(id);
            return IngestOutcome::Conflict;
        }

        // Last write wins on duplicate indices.
        entry.parts.insert(index, fragment);
        entry.last_touched = now;

        if entry.parts.len() == *entry.expected_count.as_ref() as usize {
            if let Some(message) = pending.remove(id) {
                let mut assembled = String::new();
                for i in 0..*message.expected_count.as_ref() {
                    if let Some(part) = message.parts.get(&ChunkIndex::from(i)) {
                        assembled.push_str(part.as_ref());
                    }
                }
                return IngestOutcome::Complete(assembled);
            }
        }

        IngestOutcome::Stored
    }

    /// Number of in-flight messages (diagnostic)
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }
}

impl Default for ChunkInbox {
    fn default() -> Self {
        Self::new()
    }
}
