//! Server dependencies for the counting game (using traits for testability)
//!
//! All external services use trait abstractions so tests can swap in
//! in-memory stores and spy reactors.

use std::sync::Arc;

use crate::kernel::{BaseChatReactor, BaseKeyValueStore};

/// Dependencies handed to the game at startup.
#[derive(Clone)]
pub struct ServerDeps {
    /// External document store holding the game record
    pub store: Arc<dyn BaseKeyValueStore>,
    /// Reaction and message delivery back to the chat platform
    pub reactor: Arc<dyn BaseChatReactor>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseKeyValueStore>, reactor: Arc<dyn BaseChatReactor>) -> Self {
        Self { store, reactor }
    }
}
