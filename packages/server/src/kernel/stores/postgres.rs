use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::kernel::{BaseKeyValueStore, StoreError};

/// Row in the `bot_state` table.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct StateRow {
    pub key: String,
    pub value: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

/// Key/value store backed by the `bot_state` table.
///
/// Every `set` is a single upsert, so the stored document is always replaced
/// as a whole.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Find the full row for a key (including `updated_at`).
    pub async fn find_row(&self, key: &str) -> Result<Option<StateRow>, StoreError> {
        sqlx::query_as::<_, StateRow>("SELECT key, value, updated_at FROM bot_state WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(Into::into)
    }
}

#[async_trait]
impl BaseKeyValueStore for PostgresStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.find_row(key).await?.map(|row| row.value))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO bot_state (key, value, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (key) DO UPDATE
             SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
