//! In-memory storage, for tests and previews.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use learnpath_core::ProgressState;
use super::{ProgressStorage, Result, StorageError};

/// Storage that keeps the last saved snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<Option<ProgressState>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `state`.
    pub fn with_state(state: ProgressState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
            ..Default::default()
        }
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Last successfully saved snapshot.
    pub fn snapshot(&self) -> Option<ProgressState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ProgressStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<ProgressState>> {
        Ok(self.snapshot())
    }

    async fn save(&self, state: &ProgressState) -> Result<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Other("storage unavailable".to_string()));
        }
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = Some(state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use learnpath_core::ModuleId;

    #[tokio::test]
    async fn test_memory_round_trip() {
        let storage = MemoryStorage::new();
        assert!(storage.load().await.unwrap().is_none());

        let mut state = ProgressState::new();
        state.mark_module_completed(&ModuleId::new("styling"), Utc::now());
        storage.save(&state).await.unwrap();

        assert_eq!(storage.load().await.unwrap(), Some(state));
        assert_eq!(storage.save_count(), 1);
    }

    #[tokio::test]
    async fn test_failing_saves_keep_previous_snapshot() {
        let storage = MemoryStorage::with_state(ProgressState::new());
        storage.set_fail_saves(true);

        let mut state = ProgressState::new();
        state.mark_module_completed(&ModuleId::new("styling"), Utc::now());
        assert!(storage.save(&state).await.is_err());

        assert_eq!(storage.snapshot(), Some(ProgressState::new()));
        assert_eq!(storage.save_count(), 0);
    }
}
