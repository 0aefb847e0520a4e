//! The progress store.

use std::collections::BTreeMap;
use std::sync::Arc;

use learnpath_core::{
    Catalog, Clock, CoreError, ModuleId, ModuleProgress, ProgressState, ProgressStats, SystemClock,
};
use learnpath_storage::ProgressStorage;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::config::{StoreConfig, UnknownModulePolicy};
use crate::error::Result;
use crate::event::ProgressEvent;
use crate::persister::Persister;

/// Builder for [`ProgressStore`].
pub struct StoreBuilder {
    storage: Arc<dyn ProgressStorage>,
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
}

impl StoreBuilder {
    /// Set the module catalog ids are validated against.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Load the stored state and start the background writer.
    ///
    /// Must be called inside a tokio runtime.
    pub async fn open(self) -> Result<ProgressStore> {
        let state = self.storage.load().await?.unwrap_or_default();
        info!("Loaded progress for {} modules", state.module_progress.len());

        let (events, _) = broadcast::channel(self.config.event_capacity.max(1));
        let persister = Persister::spawn(self.storage, events.clone());

        Ok(ProgressStore {
            state,
            catalog: self.catalog,
            clock: self.clock,
            config: self.config,
            events,
            persister,
        })
    }
}

/// Owner of all learner progress.
///
/// Mutators update memory immediately and queue a snapshot for the
/// background writer; they never wait on storage. Persistence failures are
/// logged and broadcast as [`ProgressEvent::PersistFailed`].
pub struct ProgressStore {
    state: ProgressState,
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    events: broadcast::Sender<ProgressEvent>,
    persister: Persister,
}

impl ProgressStore {
    /// Start building a store over `storage`.
    pub fn builder(storage: Arc<dyn ProgressStorage>) -> StoreBuilder {
        StoreBuilder {
            storage,
            catalog: Catalog::default(),
            clock: Arc::new(SystemClock),
            config: StoreConfig::default(),
        }
    }

    /// Open a store with the built-in catalog and default configuration.
    pub async fn open(storage: Arc<dyn ProgressStorage>) -> Result<Self> {
        Self::builder(storage).open().await
    }

    // === Mutators ===

    /// Mark a module's content as finished.
    pub fn mark_module_completed(&mut self, module: &ModuleId) -> Result<ModuleProgress> {
        self.check_module(module)?;
        let now = self.clock.now();
        let progress = self.state.mark_module_completed(module, now).clone();
        debug!("Module {} completed", module);

        self.commit(ProgressEvent::ModuleCompleted { module: module.clone() });
        Ok(progress)
    }

    /// Record a quiz attempt; also marks the module completed.
    pub fn mark_quiz_completed(
        &mut self,
        module: &ModuleId,
        score: u32,
        total: u32,
    ) -> Result<ModuleProgress> {
        self.check_module(module)?;
        let now = self.clock.now();
        let progress = self.state.mark_quiz_completed(module, score, total, now)?.clone();
        debug!("Quiz for {} completed: {}/{}", module, score, total);

        if let Some(expected) = self.catalog.quiz_length(module.as_str()) {
            if expected != total {
                warn!(
                    "Quiz for {} reported {} questions, catalog lists {}",
                    module, total, expected
                );
            }
        }

        self.commit(ProgressEvent::QuizCompleted {
            module: module.clone(),
            score,
            total,
        });
        Ok(progress)
    }

    /// Record that a module was opened.
    pub fn update_last_accessed(&mut self, module: &ModuleId) -> Result<ModuleProgress> {
        self.check_module(module)?;
        let now = self.clock.now();
        let progress = self.state.update_last_accessed(module, now).clone();
        debug!("Module {} accessed", module);

        self.commit(ProgressEvent::Accessed { module: module.clone() });
        Ok(progress)
    }

    /// Clear all progress.
    pub fn reset_progress(&mut self) {
        let cleared = self.state.module_progress.len();
        self.state.reset();
        info!("Progress reset ({} modules cleared)", cleared);

        self.commit(ProgressEvent::Reset);
    }

    // === Read access ===

    /// Current progress, keyed by module id.
    pub fn module_progress(&self) -> &BTreeMap<ModuleId, ModuleProgress> {
        &self.state.module_progress
    }

    /// Progress for one module, or the untouched default.
    pub fn progress_for(&self, module: &str) -> ModuleProgress {
        self.state.get(module)
    }

    /// The whole state.
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// The catalog ids are checked against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Aggregate statistics over the catalog.
    pub fn stats(&self) -> ProgressStats {
        ProgressStats::compute(&self.state, &self.catalog)
    }

    /// Receive change events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.events.subscribe()
    }

    /// Wait until every queued snapshot has been written.
    pub async fn flush(&self) -> Result<()> {
        self.persister.flush().await
    }

    fn check_module(&self, module: &ModuleId) -> Result<()> {
        if self.catalog.contains(module.as_str()) {
            return Ok(());
        }
        match self.config.unknown_module_policy {
            UnknownModulePolicy::Accept => Ok(()),
            UnknownModulePolicy::Warn => {
                warn!("Recording progress for unknown module {}", module);
                Ok(())
            }
            UnknownModulePolicy::Reject => Err(CoreError::UnknownModule(module.clone()).into()),
        }
    }

    fn commit(&self, event: ProgressEvent) {
        // Sent before the snapshot is queued so a PersistFailed for this
        // write always follows it. No subscribers is fine.
        let _ = self.events.send(event);
        self.persister.save(self.state.clone());
    }
}
