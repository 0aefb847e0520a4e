//! JSON file storage implementation.
//!
//! Stores the progress state as a single pretty-printed JSON file named after
//! the storage key. Writes go to a sibling temp file that is then renamed over
//! the target, so readers see either the old blob or the new one.

use std::path::{Path, PathBuf};

use learnpath_core::ProgressState;
use super::{ProgressStorage, Result, DEFAULT_STORAGE_KEY};
use tokio::fs;
use tracing::debug;

/// File-based JSON storage backend.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    key: String,
}

impl JsonStorage {
    /// Create storage under `root` using the default key. The directory is
    /// created if missing.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_key(root, DEFAULT_STORAGE_KEY).await
    }

    /// Create storage under `root` with a custom key.
    pub async fn with_key(root: impl AsRef<Path>, key: impl Into<String>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;

        Ok(Self {
            root,
            key: key.into(),
        })
    }

    /// Path of the state file.
    pub fn path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.key))
    }

    fn tmp_path(&self) -> PathBuf {
        self.root.join(format!("{}.json.tmp", self.key))
    }
}

#[async_trait::async_trait]
impl ProgressStorage for JsonStorage {
    async fn load(&self) -> Result<Option<ProgressState>> {
        let path = self.path();
        let state = read_json(&path).await?;
        debug!("Loaded progress from {} (present: {})", path.display(), state.is_some());
        Ok(state)
    }

    async fn save(&self, state: &ProgressState) -> Result<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, self.path()).await?;

        debug!("Saved progress for {} modules", state.module_progress.len());
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
