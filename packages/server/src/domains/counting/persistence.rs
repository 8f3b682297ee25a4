//! Persistence gateway - the game record in the external key/value store.
//!
//! `load` fails open: a missing record, a store error or a malformed payload
//! all yield the default state. `save` replaces the whole document.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domains::counting::models::GameState;
use crate::kernel::{BaseKeyValueStore, StoreError};

/// Default key under which the game record is stored.
pub const DEFAULT_STATE_KEY: &str = "counting_game";

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Failed to encode game state: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store write failed: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct StateGateway {
    store: Arc<dyn BaseKeyValueStore>,
    key: String,
}

impl StateGateway {
    pub fn new(store: Arc<dyn BaseKeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Load the persisted state, falling back to the default on any problem.
    pub async fn load(&self) -> GameState {
        let value = match self.store.get(&self.key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                info!(key = %self.key, "No saved game state, starting fresh");
                return GameState::default();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read game state, starting fresh");
                return GameState::default();
            }
        };

        match serde_json::from_value::<GameState>(value) {
            Ok(state) => {
                let state = state.normalized();
                info!(
                    key = %self.key,
                    channel_id = ?state.channel_id,
                    current_number = state.current_number,
                    "Loaded game state"
                );
                state
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Saved game state is malformed, starting fresh");
                GameState::default()
            }
        }
    }

    /// Replace the persisted record with `state`.
    pub async fn save(&self, state: &GameState) -> Result<(), PersistError> {
        let value = serde_json::to_value(state)?;
        self.store.set(&self.key, value).await?;
        Ok(())
    }
}
