//! In-process key/value store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::kernel::{BaseKeyValueStore, StoreError};

/// Key/value store backed by a shared `HashMap`.
///
/// Thread-safe, cloneable. Clones share the same map, so a test can keep a
/// handle and inspect what the game persisted.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document before the store is handed to the game.
    pub async fn with_entry(self, key: &str, value: serde_json::Value) -> Self {
        self.entries.write().await.insert(key.to_string(), value);
        self
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl BaseKeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
