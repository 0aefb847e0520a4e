//! Storage trait abstraction.

use async_trait::async_trait;
use learnpath_core::ProgressState;

/// Namespace key the progress blob is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "react-native-learning-progress";

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Durable slot holding the whole progress state.
///
/// Backends store one blob; every save replaces it entirely.
#[async_trait]
pub trait ProgressStorage: Send + Sync {
    /// Load the stored state; `None` when nothing was ever saved.
    async fn load(&self) -> Result<Option<ProgressState>>;

    /// Replace the stored state.
    async fn save(&self, state: &ProgressState) -> Result<()>;
}
