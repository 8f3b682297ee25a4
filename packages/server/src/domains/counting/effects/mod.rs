//! Counting domain effects.
//!
//! Effects watch outcomes and perform IO against the chat connector.

pub mod reactions;

pub use reactions::{failure_notice, react_to_outcome, FAILURE_MARKER, SUCCESS_MARKER};
