//! Counting domain events.
//!
//! - [`ChatMessage`]: the candidate message handed to the machine (input fact)
//! - [`Outcome`]: what the machine decided (output fact, drives effects)

use serde::{Deserialize, Serialize};

use crate::common::{ActorId, ChannelId, MessageId};
use crate::domains::counting::validator::FailReason;

/// A chat message that passed the adapter's self/bot filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub actor_id: ActorId,
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub text: String,
}

/// Why a message produced no transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No channel has been bound yet
    Unconfigured,
    /// Message was posted outside the bound channel
    OtherChannel,
    /// Same message delivered again inside the dedup window
    Duplicate,
    /// Non-numeric chatter under the ignore policy
    Ignored,
    /// Posted by the bot itself
    BotAuthored,
}

/// Result of processing one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The count advanced to `value`
    #[serde(rename = "accepted")]
    AcceptedCount { value: u64 },
    /// The chain broke; `expected` was the number that should have been posted
    #[serde(rename = "reset")]
    ResetCount { expected: u64, reason: FailReason },
    /// No state change and no reaction
    NotApplicable { skipped: SkipReason },
}

impl Outcome {
    /// True when the game state changed and must be persisted.
    pub fn is_transition(&self) -> bool {
        !matches!(self, Outcome::NotApplicable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_outcome_wire_format() {
        assert_eq!(
            serde_json::to_value(Outcome::AcceptedCount { value: 3 }).unwrap(),
            json!({"outcome": "accepted", "value": 3})
        );
        assert_eq!(
            serde_json::to_value(Outcome::ResetCount {
                expected: 6,
                reason: FailReason::WrongNumber
            })
            .unwrap(),
            json!({"outcome": "reset", "expected": 6, "reason": "wrong-number"})
        );
        assert_eq!(
            serde_json::to_value(Outcome::NotApplicable {
                skipped: SkipReason::Duplicate
            })
            .unwrap(),
            json!({"outcome": "not_applicable", "skipped": "duplicate"})
        );
    }

    #[test]
    fn test_only_counts_and_resets_are_transitions() {
        assert!(Outcome::AcceptedCount { value: 1 }.is_transition());
        assert!(Outcome::ResetCount {
            expected: 1,
            reason: FailReason::ConsecutiveActor
        }
        .is_transition());
        assert!(!Outcome::NotApplicable {
            skipped: SkipReason::Unconfigured
        }
        .is_transition());
    }
}
