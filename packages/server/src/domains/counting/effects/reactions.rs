//! Reaction effect - turns an outcome into chat feedback.
//!
//! - `AcceptedCount` → ✅ on the message
//! - `ResetCount`    → ❌ on the message + a failure notice in the channel
//! - `NotApplicable` → nothing
//!
//! Delivery problems never reach the actor: a vanished message is ignored,
//! anything else is logged.

use tracing::{debug, warn};

use crate::common::ActorId;
use crate::domains::counting::events::{ChatMessage, Outcome};
use crate::domains::counting::validator::FailReason;
use crate::kernel::{BaseChatReactor, ReactionError};

pub const SUCCESS_MARKER: &str = "✅";
pub const FAILURE_MARKER: &str = "❌";

/// Text posted to the channel when someone breaks the chain.
pub fn failure_notice(actor_id: &ActorId, reason: FailReason, expected: u64) -> String {
    format!(
        "{} ruined it! {}. The next number was **{}**. \
         The count has been reset, start again from **1**.",
        actor_id.mention(),
        reason.describe(),
        expected
    )
}

/// Deliver the reaction (and notice) for `outcome`.
pub async fn react_to_outcome(
    reactor: &dyn BaseChatReactor,
    message: &ChatMessage,
    outcome: &Outcome,
) {
    match outcome {
        Outcome::AcceptedCount { .. } => {
            let result = reactor
                .add_reaction(&message.channel_id, &message.message_id, SUCCESS_MARKER)
                .await;
            log_delivery(result, message, "success reaction");
        }
        Outcome::ResetCount { expected, reason } => {
            let result = reactor
                .add_reaction(&message.channel_id, &message.message_id, FAILURE_MARKER)
                .await;
            log_delivery(result, message, "failure reaction");

            let notice = failure_notice(&message.actor_id, *reason, *expected);
            let result = reactor.send_message(&message.channel_id, &notice).await;
            log_delivery(result, message, "failure notice");
        }
        Outcome::NotApplicable { .. } => {}
    }
}

fn log_delivery(result: Result<(), ReactionError>, message: &ChatMessage, what: &str) {
    match result {
        Ok(()) => {}
        Err(ReactionError::MessageNotFound) => {
            debug!(
                message_id = %message.message_id,
                "Message vanished before {} was delivered",
                what
            );
        }
        Err(e) => {
            warn!(
                channel_id = %message.channel_id,
                message_id = %message.message_id,
                error = %e,
                "Failed to deliver {}",
                what
            );
        }
    }
}
