//! Aggregate statistics derived from progress.

use serde::Serialize;
use crate::catalog::Catalog;
use crate::progress::ProgressState;

/// Summary numbers shown on the home and progress screens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgressStats {
    /// Catalog modules marked completed
    pub completed_modules: usize,

    /// Modules in the catalog
    pub total_modules: usize,

    /// Catalog modules with a recorded quiz attempt
    pub quizzes_taken: usize,

    /// Sum of latest quiz scores
    pub total_quiz_score: u64,

    /// Sum of the question counts those scores were taken against
    pub max_quiz_score: u64,
}

impl ProgressStats {
    /// Compute statistics for a state against a catalog.
    ///
    /// Only catalog modules are counted, for completion and quizzes alike.
    /// Quiz attempts without a stored total fall back to the catalog quiz
    /// length.
    pub fn compute(state: &ProgressState, catalog: &Catalog) -> Self {
        let mut stats = Self {
            total_modules: catalog.len(),
            ..Default::default()
        };

        for (id, progress) in &state.module_progress {
            if !catalog.contains(id.as_str()) {
                continue;
            }
            if progress.completed {
                stats.completed_modules += 1;
            }

            if !progress.quiz_completed {
                continue;
            }
            stats.quizzes_taken += 1;

            let Some(score) = progress.quiz_score else {
                continue;
            };
            let total = progress
                .quiz_total
                .or_else(|| catalog.quiz_length(id.as_str()));
            if let Some(total) = total {
                stats.total_quiz_score += u64::from(score.min(total));
                stats.max_quiz_score += u64::from(total);
            }
        }

        stats
    }

    /// Completed catalog modules as a rounded percentage (0-100).
    pub fn completion_percentage(&self) -> u32 {
        percentage(self.completed_modules as u64, self.total_modules as u64)
    }

    /// Quiz score across all attempts as a rounded percentage (0-100).
    pub fn average_quiz_score(&self) -> u32 {
        percentage(self.total_quiz_score, self.max_quiz_score)
    }
}

fn percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}
