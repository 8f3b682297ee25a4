//! Counting game state machine.
//!
//! The machine is a pure decision maker: NO IO, NO async. It owns the game
//! state and the dedup guard, applies validator decisions, and returns an
//! [`Outcome`] that the game handle turns into persistence and reactions.
//!
//! ```text
//! ChatMessage
//!     → channel check      (NotApplicable: Unconfigured / OtherChannel)
//!     → DedupGuard         (NotApplicable: Duplicate)
//!     → validate()
//!         Accept(n)        → state {n, actor}   → AcceptedCount
//!         Fail(exp, why)   → state {0, none}    → ResetCount
//!         Ignore           →                    → NotApplicable: Ignored
//! ```

use std::time::{Duration, Instant};

use tracing::debug;

use crate::common::ChannelId;
use crate::domains::counting::dedup::DedupGuard;
use crate::domains::counting::events::{ChatMessage, Outcome, SkipReason};
use crate::domains::counting::models::GameState;
use crate::domains::counting::validator::{validate, Decision, NonNumericPolicy};

pub struct CountingMachine {
    state: GameState,
    dedup: DedupGuard,
    policy: NonNumericPolicy,
}

impl CountingMachine {
    pub fn new(state: GameState, dedup_window: Duration, policy: NonNumericPolicy) -> Self {
        Self {
            state,
            dedup: DedupGuard::new(dedup_window),
            policy,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn policy(&self) -> NonNumericPolicy {
        self.policy
    }

    pub fn process(&mut self, message: &ChatMessage) -> Outcome {
        self.process_at(message, Instant::now())
    }

    /// Process a message as if it arrived at `now`.
    pub fn process_at(&mut self, message: &ChatMessage, now: Instant) -> Outcome {
        match &self.state.channel_id {
            None => return skipped(SkipReason::Unconfigured),
            Some(bound) if bound != &message.channel_id => {
                return skipped(SkipReason::OtherChannel)
            }
            Some(_) => {}
        }

        if !self.dedup.should_process_at(&message.message_id, now) {
            debug!(message_id = %message.message_id, "Dropping redundant delivery");
            return skipped(SkipReason::Duplicate);
        }
        self.dedup.mark_processed_at(message.message_id.clone(), now);

        match validate(&self.state, &message.actor_id, &message.text, self.policy) {
            Decision::Accept(value) => {
                self.state.advance(value, message.actor_id.clone());
                Outcome::AcceptedCount { value }
            }
            Decision::Fail { expected, reason } => {
                self.state.reset();
                Outcome::ResetCount { expected, reason }
            }
            Decision::Ignore => skipped(SkipReason::Ignored),
        }
    }

    /// Bind the game to `channel_id`, zeroing the count.
    pub fn bind_channel(&mut self, channel_id: ChannelId) -> &GameState {
        self.state.bind(channel_id);
        &self.state
    }
}

fn skipped(reason: SkipReason) -> Outcome {
    Outcome::NotApplicable { skipped: reason }
}
