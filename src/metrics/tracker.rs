use std::collections::HashMap;

use tokio::time::Instant;

use super::types::LatencyKind;

pub const DEFAULT_MAX_PENDING: usize = 1000;

#[derive(Debug, Clone, Copy)]
struct PendingEvent {
    seq: u64,
    started: Instant,
}

/// Pairs start and completion notifications by id and measures the time
/// between them.
#[derive(Debug)]
pub struct EventTracker {
    pending: HashMap<(LatencyKind, u32), PendingEvent>,
    max_pending: usize,
    next_seq: u64,
}

impl Default for EventTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PENDING)
    }
}

impl EventTracker {
    #[must_use]
    pub fn new(max_pending: usize) -> Self {
        Self {
            pending: HashMap::new(),
            max_pending: max_pending.max(1),
            next_seq: 0,
        }
    }

    pub fn begin(&mut self, kind: LatencyKind, id: u32) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.insert(
            (kind, id),
            PendingEvent {
                seq,
                started: Instant::now(),
            },
        );
        if self.pending.len() > self.max_pending {
            self.evict_oldest();
        }
    }

    /// Returns the elapsed milliseconds since the matching `begin`.
    pub fn complete(&mut self, kind: LatencyKind, id: u32) -> Option<f64> {
        let Some(event) = self.pending.remove(&(kind, id)) else {
            tracing::debug!("{} event {} not found", kind.label(), id);
            return None;
        };
        let latency_ms = event.started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!("{} {} latency: {:.2} ms", kind.label(), id, latency_ms);
        Some(latency_ms)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .pending
            .iter()
            .min_by_key(|(_, event)| event.seq)
            .map(|(key, _)| *key);
        if let Some(key) = oldest {
            self.pending.remove(&key);
            tracing::debug!("{} event {} dropped before completion", key.0.label(), key.1);
        }
    }
}
