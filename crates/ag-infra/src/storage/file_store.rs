//! File-based key-value store
//!
//! All keys live in a single JSON object file. Every write rewrites the
//! whole file; the parent directory is created on first write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use ag_core::ports::KeyValueStorePort;

pub const DEFAULT_STORE_FILE: &str = "store.json";

pub struct FileKeyValueStore {
    path: PathBuf,
    // serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn read_all(&self) -> anyhow::Result<BTreeMap<String, String>> {
        if !fs::try_exists(&self.path).await? {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read store file: {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse store file: {}", e))
    }

    async fn write_all(&self, values: &BTreeMap<String, String>) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(values)
            .map_err(|e| anyhow::anyhow!("Failed to serialize store: {}", e))?;

        let mut file = fs::File::create(&self.path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create store file: {}", e))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write store file: {}", e))?;
        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync store file: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_all().await?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values).await?;
        debug!(key, "stored value");
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.read_all().await?;
        if values.remove(key).is_some() {
            self.write_all(&values).await?;
            debug!(key, "removed value");
        }
        Ok(())
    }
}
