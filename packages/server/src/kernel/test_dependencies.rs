// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{
    BaseChatReactor, BaseKeyValueStore, InMemoryStore, ReactionError, ServerDeps, StoreError,
};
use crate::common::{ChannelId, MessageId};

// =============================================================================
// Spy Chat Reactor
// =============================================================================

/// A call captured by [`SpyReactor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactorCall {
    Reaction {
        channel_id: String,
        message_id: String,
        emoji: String,
    },
    Message {
        channel_id: String,
        content: String,
    },
}

/// How the spy should fail, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactorFailure {
    /// The target message was deleted
    MessageNotFound,
    /// The connector answered with a server error
    Rejected,
}

impl ReactorFailure {
    fn to_error(self) -> ReactionError {
        match self {
            ReactorFailure::MessageNotFound => ReactionError::MessageNotFound,
            ReactorFailure::Rejected => ReactionError::Rejected {
                status: 500,
                body: "connector exploded".to_string(),
            },
        }
    }
}

/// Records every reaction and message; optionally fails them.
#[derive(Default)]
pub struct SpyReactor {
    calls: Mutex<Vec<ReactorCall>>,
    failure: Option<ReactorFailure>,
}

impl SpyReactor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call with the given failure (calls are still recorded).
    pub fn failing_with(failure: ReactorFailure) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(failure),
        }
    }

    pub fn calls(&self) -> Vec<ReactorCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Emojis added, in order.
    pub fn reactions(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ReactorCall::Reaction { emoji, .. } => Some(emoji),
                ReactorCall::Message { .. } => None,
            })
            .collect()
    }

    /// Channel messages sent, in order.
    pub fn messages(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ReactorCall::Message { content, .. } => Some(content),
                ReactorCall::Reaction { .. } => None,
            })
            .collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, call: ReactorCall) -> Result<(), ReactionError> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BaseChatReactor for SpyReactor {
    async fn add_reaction(
        &self,
        channel_id: &ChannelId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<(), ReactionError> {
        self.record(ReactorCall::Reaction {
            channel_id: channel_id.to_string(),
            message_id: message_id.to_string(),
            emoji: emoji.to_string(),
        })
    }

    async fn send_message(
        &self,
        channel_id: &ChannelId,
        content: &str,
    ) -> Result<(), ReactionError> {
        self.record(ReactorCall::Message {
            channel_id: channel_id.to_string(),
            content: content.to_string(),
        })
    }
}

// =============================================================================
// Failing Store
// =============================================================================

/// Store whose every operation fails. Counts attempted writes.
#[derive(Default)]
pub struct FailingStore {
    set_attempts: AtomicUsize,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_attempts(&self) -> usize {
        self.set_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BaseKeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("store is down".to_string()))
    }

    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        self.set_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("store is down".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Test dependency bundle. Keeps typed handles so tests can inspect mocks.
pub struct TestDependencies {
    pub store: Arc<dyn BaseKeyValueStore>,
    pub memory_store: InMemoryStore,
    pub reactor: Arc<SpyReactor>,
}

impl TestDependencies {
    pub fn new() -> Self {
        let memory_store = InMemoryStore::new();
        Self {
            store: Arc::new(memory_store.clone()),
            memory_store,
            reactor: Arc::new(SpyReactor::new()),
        }
    }

    /// Use a pre-seeded in-memory store
    pub fn with_memory_store(mut self, store: InMemoryStore) -> Self {
        self.store = Arc::new(store.clone());
        self.memory_store = store;
        self
    }

    /// Use an arbitrary store (e.g. [`FailingStore`])
    pub fn with_store(mut self, store: Arc<dyn BaseKeyValueStore>) -> Self {
        self.store = store;
        self
    }

    /// Set a spy reactor
    pub fn with_reactor(mut self, reactor: SpyReactor) -> Self {
        self.reactor = Arc::new(reactor);
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_server_deps(&self) -> ServerDeps {
        ServerDeps::new(self.store.clone(), self.reactor.clone())
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
