//! Test harness wiring a counting game to in-memory dependencies.
//!
//! Every harness owns its own store and spy reactor, so tests never share
//! state. `restart()` starts a fresh game over the same store to exercise
//! load-on-startup.

use std::sync::Arc;

use axum::Router;
use counting_core::common::ChannelId;
use counting_core::domains::counting::{CountingGame, CountingSettings, GameState, Outcome};
use counting_core::kernel::{BaseKeyValueStore, TestDependencies};
use counting_core::server::{build_app, AppState};

use super::message;

pub struct TestHarness {
    pub deps: TestDependencies,
    pub settings: CountingSettings,
    pub game: Arc<CountingGame>,
}

impl TestHarness {
    pub async fn new() -> Self {
        Self::with_deps(TestDependencies::new(), CountingSettings::default()).await
    }

    pub async fn with_deps(deps: TestDependencies, settings: CountingSettings) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let game = start_game(&deps, &settings).await;
        Self {
            deps,
            settings,
            game,
        }
    }

    /// Harness with the game already bound to `channel_id`.
    pub async fn bound_to(channel_id: &str) -> Self {
        let harness = Self::new().await;
        harness.game.bind_channel(ChannelId::new(channel_id));
        harness
    }

    /// Post `text` as `actor` in `channel` with a fresh message id.
    pub async fn post(&self, actor: &str, channel: &str, text: &str) -> Outcome {
        self.game.handle_message(message(actor, channel, text)).await
    }

    /// Wait for queued saves, then read the stored record.
    pub async fn stored_state(&self) -> Option<GameState> {
        self.game.flush().await;
        let value = self
            .deps
            .store
            .get(&self.settings.state_key)
            .await
            .expect("store read failed")?;
        Some(serde_json::from_value(value).expect("stored record is not a game state"))
    }

    /// Shut the current game down and start a new one over the same store.
    pub async fn restart(self) -> Self {
        self.game.shutdown().await;
        let game = start_game(&self.deps, &self.settings).await;
        Self { game, ..self }
    }

    pub fn router(&self, bot_user_id: Option<&str>, admin_token: Option<&str>) -> Router {
        build_app(
            AppState {
                game: self.game.clone(),
                bot_user_id: bot_user_id.map(Into::into),
            },
            admin_token.map(str::to_string),
        )
    }
}

async fn start_game(deps: &TestDependencies, settings: &CountingSettings) -> Arc<CountingGame> {
    Arc::new(CountingGame::start(&deps.into_server_deps(), settings.clone()).await)
}
