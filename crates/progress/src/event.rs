//! Change notifications.

use learnpath_core::ModuleId;

/// Something that happened to the progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Module content marked finished
    ModuleCompleted {
        /// Module affected
        module: ModuleId,
    },

    /// Quiz attempt recorded
    QuizCompleted {
        /// Module affected
        module: ModuleId,
        /// Correct answers
        score: u32,
        /// Questions asked
        total: u32,
    },

    /// Module opened
    Accessed {
        /// Module affected
        module: ModuleId,
    },

    /// All progress cleared
    Reset,

    /// A background write failed; in-memory state is still current
    PersistFailed {
        /// Storage error text
        message: String,
    },
}

impl ProgressEvent {
    /// Module the event concerns, if any.
    pub fn module(&self) -> Option<&ModuleId> {
        match self {
            ProgressEvent::ModuleCompleted { module }
            | ProgressEvent::QuizCompleted { module, .. }
            | ProgressEvent::Accessed { module } => Some(module),
            ProgressEvent::Reset | ProgressEvent::PersistFailed { .. } => None,
        }
    }
}
