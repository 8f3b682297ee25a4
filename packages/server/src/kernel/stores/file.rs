//! JSON-file key/value store.
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a named temp file in the
//! same directory, are synced to disk, then persisted over the target, so a
//! crash leaves either the old document or the new one.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::kernel::{BaseKeyValueStore, StoreError};

pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys become file names: ASCII letters, digits, `_` and `-` only.
    pub fn validate_key(key: &str) -> Result<(), StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(())
        } else {
            Err(StoreError::InvalidKey(key.to_string()))
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

/// Blocking write: temp file in `dir`, `sync_all`, then persist over `path`.
fn write_synced(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    #[cfg(unix)]
    if let Err(e) = std::fs::File::open(dir).and_then(|d| d.sync_all()) {
        debug!(path = %dir.display(), "Directory sync failed (best-effort): {e}");
    }

    Ok(())
}

#[async_trait]
impl BaseKeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec_pretty(&value)?;
        let len = bytes.len();

        let dir = self.dir.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_synced(&dir, &target, &bytes))
            .await
            .map_err(|e| StoreError::Unavailable(format!("file writer task failed: {}", e)))??;

        debug!(path = %path.display(), bytes = len, "Wrote state document");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        assert!(store.get("counting_game").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_leaves_only_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();

        store
            .set("counting_game", json!({"currentNumber": 4}))
            .await
            .unwrap();
        store
            .set("counting_game", json!({"currentNumber": 5}))
            .await
            .unwrap();

        assert_eq!(
            store.get("counting_game").await.unwrap(),
            Some(json!({"currentNumber": 5}))
        );

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("counting_game.json")]);
    }

    #[tokio::test]
    async fn test_open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("bot");
        let store = JsonFileStore::open(&nested).await.unwrap();

        store.set("counting_game", json!(1)).await.unwrap();
        assert!(nested.join("counting_game.json").exists());
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        let err = store.set("../escape", json!(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey(_)));
    }

    #[test]
    fn test_validate_key() {
        assert!(JsonFileStore::validate_key("counting_game").is_ok());
        assert!(JsonFileStore::validate_key("bot-2").is_ok());
        for bad in ["", "bot.state", "a/b", "counting game"] {
            assert!(
                matches!(JsonFileStore::validate_key(bad), Err(StoreError::InvalidKey(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        tokio::fs::write(dir.path().join("counting_game.json"), b"{not json")
            .await
            .unwrap();

        let err = store.get("counting_game").await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
