//! Typed ID definitions for chat entities.
//!
//! # Example
//!
//! ```rust
//! use counting_core::common::{ChannelId, MessageId};
//!
//! let channel: ChannelId = ChannelId::new("800");
//! let message: MessageId = MessageId::new("801");
//!
//! // This would be a compile error:
//! // let wrong: MessageId = channel;
//! # let _ = (channel, message);
//! ```

pub use super::id::{EmptyIdError, Snowflake};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for chat users who post candidate numbers.
pub struct Actor;

/// Marker type for chat channels.
pub struct Channel;

/// Marker type for individual chat messages.
pub struct Message;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type ActorId = Snowflake<Actor>;

pub type ChannelId = Snowflake<Channel>;

pub type MessageId = Snowflake<Message>;
