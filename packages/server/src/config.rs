use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::common::ActorId;
use crate::domains::counting::{CountingSettings, NonNumericPolicy, DEFAULT_STATE_KEY};
use crate::kernel::JsonFileStore;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres backend for the game record (takes precedence over `state_dir`)
    pub database_url: Option<String>,
    /// Directory for the JSON-file backend
    pub state_dir: Option<PathBuf>,
    pub state_key: String,
    /// The bot's own user id, so its messages are never counted
    pub bot_user_id: Option<ActorId>,
    pub connector_url: Option<String>,
    pub connector_token: Option<String>,
    /// Shared secret guarding the setup routes
    pub admin_token: Option<String>,
    pub dedup_window: Duration,
    pub non_numeric_policy: NonNumericPolicy,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            database_url: non_empty_var("DATABASE_URL"),
            state_dir: non_empty_var("STATE_DIR").map(PathBuf::from),
            state_key: state_key(non_empty_var("STATE_KEY"))?,
            bot_user_id: non_empty_var("BOT_USER_ID").map(ActorId::new),
            connector_url: non_empty_var("CONNECTOR_URL"),
            connector_token: non_empty_var("CONNECTOR_TOKEN"),
            admin_token: non_empty_var("ADMIN_TOKEN"),
            dedup_window: Duration::from_millis(
                env::var("DEDUP_WINDOW_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .context("DEDUP_WINDOW_MS must be a number of milliseconds")?,
            ),
            non_numeric_policy: env::var("NON_NUMERIC_POLICY")
                .unwrap_or_else(|_| "reset".to_string())
                .parse()
                .map_err(anyhow::Error::msg)
                .context("NON_NUMERIC_POLICY must be 'reset' or 'ignore'")?,
        })
    }

    pub fn counting_settings(&self) -> CountingSettings {
        CountingSettings {
            state_key: self.state_key.clone(),
            dedup_window: self.dedup_window,
            non_numeric_policy: self.non_numeric_policy,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The record key must be usable by every store backend, including file names.
fn state_key(raw: Option<String>) -> Result<String> {
    let key = raw.unwrap_or_else(|| DEFAULT_STATE_KEY.to_string());
    JsonFileStore::validate_key(&key)
        .context("STATE_KEY may only contain ASCII letters, digits, '_' and '-'")?;
    Ok(key)
}
