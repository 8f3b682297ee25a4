//! Sequence validator - pure decision on a candidate count.
//!
//! Rules, in order:
//! 1. The trimmed text must be the canonical decimal form of `current + 1`,
//!    otherwise the count fails with [`FailReason::WrongNumber`].
//! 2. The actor must differ from the one who posted `current`, otherwise the
//!    count fails with [`FailReason::ConsecutiveActor`].
//!
//! A wrong number from the repeating actor is reported as a wrong number.
//! Channel binding and self-message filtering happen before this point.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ActorId;
use crate::domains::counting::models::GameState;

/// Why a count broke the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailReason {
    WrongNumber,
    ConsecutiveActor,
}

impl FailReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailReason::WrongNumber => "wrong-number",
            FailReason::ConsecutiveActor => "consecutive-actor",
        }
    }

    /// Human-readable sentence used in the failure notice.
    pub fn describe(&self) -> &'static str {
        match self {
            FailReason::WrongNumber => "That's the wrong number",
            FailReason::ConsecutiveActor => "You can't count twice in a row",
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with text that is not a number at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonNumericPolicy {
    /// Treat it like a wrong number and reset the chain.
    #[default]
    Reset,
    /// Leave the game untouched; chatter in the channel is allowed.
    Ignore,
}

impl FromStr for NonNumericPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(NonNumericPolicy::Reset),
            "ignore" => Ok(NonNumericPolicy::Ignore),
            other => Err(format!(
                "unknown non-numeric policy '{}' (expected 'reset' or 'ignore')",
                other
            )),
        }
    }
}

/// Validator verdict for one candidate message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept(u64),
    Fail { expected: u64, reason: FailReason },
    Ignore,
}

/// Parsed form of a candidate message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Candidate {
    Number(u64),
    /// Digits only, but not canonical or too large ("007", overflow).
    MalformedNumber,
    NotANumber,
}

fn parse_candidate(raw_text: &str) -> Candidate {
    let text = raw_text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Candidate::NotANumber;
    }
    match text.parse::<u64>() {
        Ok(value) if value.to_string() == text => Candidate::Number(value),
        _ => Candidate::MalformedNumber,
    }
}

/// Decide whether `raw_text` from `actor_id` continues the count.
pub fn validate(
    state: &GameState,
    actor_id: &ActorId,
    raw_text: &str,
    policy: NonNumericPolicy,
) -> Decision {
    let expected = state.next_expected();
    let wrong_number = Decision::Fail {
        expected,
        reason: FailReason::WrongNumber,
    };

    let value = match parse_candidate(raw_text) {
        Candidate::Number(value) => value,
        Candidate::MalformedNumber => return wrong_number,
        Candidate::NotANumber => {
            return match policy {
                NonNumericPolicy::Reset => wrong_number,
                NonNumericPolicy::Ignore => Decision::Ignore,
            }
        }
    };

    if value != expected || !GameState::can_record(value) {
        return wrong_number;
    }

    if state.last_actor_id.as_ref() == Some(actor_id) {
        return Decision::Fail {
            expected,
            reason: FailReason::ConsecutiveActor,
        };
    }

    Decision::Accept(value)
}
