//! Dedup guard - suppresses redundant delivery of the same message event.
//!
//! Only the most recently processed message is remembered. A repeat of that
//! message inside the window is dropped; anything else passes. This is a
//! narrow mitigation for transports that occasionally deliver an event twice,
//! not an at-most-once guarantee.

use std::time::{Duration, Instant};

use crate::common::MessageId;

/// Default window during which a repeated message id counts as redundant.
pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_millis(2000);

/// The last processed message and when it was marked.
#[derive(Debug, Clone)]
pub struct DedupRecord {
    pub message_id: MessageId,
    pub marked_at: Instant,
}

#[derive(Debug, Clone)]
pub struct DedupGuard {
    window: Duration,
    last: Option<DedupRecord>,
}

impl DedupGuard {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn last(&self) -> Option<&DedupRecord> {
        self.last.as_ref()
    }

    pub fn should_process(&self, message_id: &MessageId) -> bool {
        self.should_process_at(message_id, Instant::now())
    }

    pub fn should_process_at(&self, message_id: &MessageId, now: Instant) -> bool {
        match &self.last {
            Some(record) if &record.message_id == message_id => {
                now.saturating_duration_since(record.marked_at) >= self.window
            }
            _ => true,
        }
    }

    pub fn mark_processed(&mut self, message_id: MessageId) {
        self.mark_processed_at(message_id, Instant::now());
    }

    pub fn mark_processed_at(&mut self, message_id: MessageId, now: Instant) {
        self.last = Some(DedupRecord {
            message_id,
            marked_at: now,
        });
    }
}

impl Default for DedupGuard {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW)
    }
}
