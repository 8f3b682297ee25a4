//! CountingGame - the owned game handle shared with the HTTP edge.
//!
//! Holds the machine behind a mutex that is only locked for the synchronous
//! decision and the (non-blocking) enqueue of its snapshot. Reactions run
//! after the lock is released. Two messages can never interleave their
//! mutation of the counter, and saves reach the writer in decision order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::info;

use crate::common::ChannelId;
use crate::domains::counting::dedup::DEFAULT_DEDUP_WINDOW;
use crate::domains::counting::effects::react_to_outcome;
use crate::domains::counting::events::{ChatMessage, Outcome};
use crate::domains::counting::machine::CountingMachine;
use crate::domains::counting::models::{GameState, GameStatus};
use crate::domains::counting::persist_queue::PersistQueue;
use crate::domains::counting::persistence::{StateGateway, DEFAULT_STATE_KEY};
use crate::domains::counting::validator::NonNumericPolicy;
use crate::kernel::{BaseChatReactor, ServerDeps};

/// Tunables for the game, usually taken from [`crate::Config`].
#[derive(Debug, Clone)]
pub struct CountingSettings {
    pub state_key: String,
    pub dedup_window: Duration,
    pub non_numeric_policy: NonNumericPolicy,
}

impl Default for CountingSettings {
    fn default() -> Self {
        Self {
            state_key: DEFAULT_STATE_KEY.to_string(),
            dedup_window: DEFAULT_DEDUP_WINDOW,
            non_numeric_policy: NonNumericPolicy::default(),
        }
    }
}

pub struct CountingGame {
    machine: Mutex<CountingMachine>,
    gateway: StateGateway,
    persist: PersistQueue,
    reactor: Arc<dyn BaseChatReactor>,
}

impl CountingGame {
    /// Load the saved state (or defaults) and start the persist writer.
    pub async fn start(deps: &ServerDeps, settings: CountingSettings) -> Self {
        let gateway = StateGateway::new(deps.store.clone(), settings.state_key);
        let state = gateway.load().await;
        let machine =
            CountingMachine::new(state, settings.dedup_window, settings.non_numeric_policy);

        Self {
            machine: Mutex::new(machine),
            persist: PersistQueue::spawn(gateway.clone()),
            gateway,
            reactor: deps.reactor.clone(),
        }
    }

    fn machine(&self) -> MutexGuard<'_, CountingMachine> {
        self.machine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Process one candidate message: decide, persist, react.
    pub async fn handle_message(&self, message: ChatMessage) -> Outcome {
        let outcome = {
            let mut machine = self.machine();
            let outcome = machine.process(&message);
            // Enqueue under the lock so snapshots reach the writer in decision order.
            if outcome.is_transition() {
                self.persist.enqueue(machine.state().clone());
            }
            outcome
        };

        match &outcome {
            Outcome::AcceptedCount { value } => info!(
                channel_id = %message.channel_id,
                actor_id = %message.actor_id,
                value,
                "Count accepted"
            ),
            Outcome::ResetCount { expected, reason } => info!(
                channel_id = %message.channel_id,
                actor_id = %message.actor_id,
                expected,
                reason = %reason,
                "Count reset"
            ),
            Outcome::NotApplicable { .. } => {}
        }

        react_to_outcome(self.reactor.as_ref(), &message, &outcome).await;
        outcome
    }

    /// Bind the game to a channel and reset the count. Returns the confirmation text.
    ///
    /// Callers are expected to have checked authorization already.
    pub fn bind_channel(&self, channel_id: ChannelId) -> String {
        {
            let mut machine = self.machine();
            let snapshot = machine.bind_channel(channel_id.clone()).clone();
            self.persist.enqueue(snapshot);
        }

        info!(channel_id = %channel_id, "Counting channel bound");
        format!(
            "Counting channel set to <#{}>. The count starts at **1**!",
            channel_id
        )
    }

    pub fn status(&self) -> GameStatus {
        self.machine().state().status()
    }

    pub fn snapshot(&self) -> GameState {
        self.machine().state().clone()
    }

    pub fn backend_name(&self) -> &'static str {
        self.gateway.backend_name()
    }

    /// Wait for every queued save to finish.
    pub async fn flush(&self) {
        self.persist.flush().await;
    }

    /// Stop the persist writer after it writes the final snapshot.
    pub async fn shutdown(&self) {
        self.persist.shutdown().await;
    }
}
