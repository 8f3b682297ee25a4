//! Counting domain edges - entry points from the outside world.

pub mod adapter;

pub use adapter::RawChatEvent;
