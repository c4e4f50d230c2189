// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::repository::{AttributeStore, RepositoryError};

/// Attribute store persisted as a single JSON object on disk.
///
/// Writes replace the file via a temporary sibling and a rename, so a crash
/// mid-write leaves the previous contents intact.
pub struct FileAttributeStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileAttributeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, Value>, RepositoryError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl AttributeStore for FileAttributeStore {
    async fn get_attribute(&self, key: &str) -> Result<Option<Value>, RepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_attribute(&self, key: &str, value: Value) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut attributes = self.read_all().await?;
        attributes.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, serde_json::to_vec_pretty(&attributes)?).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Persisted attribute '{}' to {:?}", key, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("attributes.json");

        let store = FileAttributeStore::new(&path);
        assert_eq!(store.get_attribute("levels").await.unwrap(), None);
        store.set_attribute("levels", json!(["TS", "S"])).await.unwrap();
        store.set_attribute("reasons", json!(["1.4(a)"])).await.unwrap();

        let reopened = FileAttributeStore::new(&path);
        assert_eq!(reopened.get_attribute("levels").await.unwrap(), Some(json!(["TS", "S"])));
        assert_eq!(reopened.get_attribute("reasons").await.unwrap(), Some(json!(["1.4(a)"])));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("attributes.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileAttributeStore::new(&path);
        assert!(matches!(
            store.get_attribute("levels").await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
