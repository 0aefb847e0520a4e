//! Progress store errors.

use learnpath_core::CoreError;
use learnpath_storage::StorageError;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors returned by the progress store.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    /// Update rejected by the model
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Loading the stored state failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The last background write failed
    #[error("failed to persist progress: {0}")]
    Persist(String),

    /// The background writer is gone
    #[error("progress persister is not running")]
    PersisterClosed,
}
