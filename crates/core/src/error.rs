//! Errors for progress model operations.

use crate::id::ModuleId;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised when an update would break a progress invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Quiz recorded with zero questions
    #[error("quiz for module {module} must have at least one question")]
    InvalidQuizTotal {
        /// Module the attempt was for
        module: ModuleId,
    },

    /// More correct answers than questions
    #[error("quiz score {score} exceeds total {total} for module {module}")]
    ScoreOutOfRange {
        /// Module the attempt was for
        module: ModuleId,
        /// Reported correct answers
        score: u32,
        /// Reported question count
        total: u32,
    },

    /// Id not present in the catalog
    #[error("unknown module: {0}")]
    UnknownModule(ModuleId),
}
