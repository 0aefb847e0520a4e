//! Progress model - per-module learner progress and the persisted state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};
use crate::id::ModuleId;
use crate::Time;

/// Progress of a single module.
///
/// Missing fields deserialize to their defaults, so records written by older
/// clients (which could omit `quizCompleted`) still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleProgress {
    /// Module content marked as finished
    pub completed: bool,

    /// A quiz attempt has been recorded
    pub quiz_completed: bool,

    /// Correct answers in the latest attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u32>,

    /// Question count of the latest attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_total: Option<u32>,

    /// Last time the module was opened or updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_accessed_at: Option<Time>,
}

impl ModuleProgress {
    /// Advance the access timestamp, never moving it backwards.
    fn touch(&mut self, now: Time) {
        self.last_accessed_at = Some(match self.last_accessed_at {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    /// Whether this entry is indistinguishable from an absent one.
    pub fn is_untouched(&self) -> bool {
        *self == Self::default()
    }
}

/// All learner progress, keyed by module id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressState {
    /// Progress per module. An absent key means never touched.
    pub module_progress: BTreeMap<ModuleId, ModuleProgress>,
}

impl ProgressState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress for a module, or the untouched default.
    pub fn get(&self, id: &str) -> ModuleProgress {
        self.module_progress.get(id).cloned().unwrap_or_default()
    }

    /// Whether no module has been touched.
    pub fn is_empty(&self) -> bool {
        self.module_progress.is_empty()
    }

    fn entry(&mut self, id: &ModuleId) -> &mut ModuleProgress {
        self.module_progress.entry(id.clone()).or_default()
    }

    /// Mark the module content finished.
    pub fn mark_module_completed(&mut self, id: &ModuleId, now: Time) -> &ModuleProgress {
        let progress = self.entry(id);
        progress.completed = true;
        progress.touch(now);
        progress
    }

    /// Record a quiz attempt, replacing any previous one.
    ///
    /// Fails without touching the state when `total` is zero or
    /// `score > total`.
    pub fn mark_quiz_completed(
        &mut self,
        id: &ModuleId,
        score: u32,
        total: u32,
        now: Time,
    ) -> Result<&ModuleProgress> {
        if total == 0 {
            return Err(CoreError::InvalidQuizTotal { module: id.clone() });
        }
        if score > total {
            return Err(CoreError::ScoreOutOfRange { module: id.clone(), score, total });
        }

        let progress = self.entry(id);
        progress.quiz_completed = true;
        progress.quiz_score = Some(score);
        progress.quiz_total = Some(total);
        progress.completed = true;
        progress.touch(now);
        Ok(progress)
    }

    /// Record that the module was opened.
    pub fn update_last_accessed(&mut self, id: &ModuleId, now: Time) -> &ModuleProgress {
        let progress = self.entry(id);
        progress.touch(now);
        progress
    }

    /// Forget all progress.
    pub fn reset(&mut self) {
        self.module_progress.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn t(secs: i64) -> Time {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_mark_module_completed_creates_entry() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("react-basics");

        let progress = state.mark_module_completed(&id, t(0)).clone();
        assert!(progress.completed);
        assert!(!progress.quiz_completed);
        assert_eq!(progress.last_accessed_at, Some(t(0)));

        // Idempotent, but the timestamp moves on
        state.mark_module_completed(&id, t(5));
        let progress = state.get("react-basics");
        assert!(progress.completed);
        assert_eq!(progress.last_accessed_at, Some(t(5)));
    }

    #[test]
    fn test_quiz_implies_completed() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("styling");

        state.mark_quiz_completed(&id, 2, 3, t(0)).unwrap();
        let progress = state.get("styling");
        assert!(progress.completed);
        assert!(progress.quiz_completed);
        assert_eq!(progress.quiz_score, Some(2));
        assert_eq!(progress.quiz_total, Some(3));
    }

    #[test]
    fn test_latest_quiz_attempt_wins() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("styling");

        state.mark_quiz_completed(&id, 2, 3, t(0)).unwrap();
        state.mark_quiz_completed(&id, 1, 3, t(1)).unwrap();
        assert_eq!(state.get("styling").quiz_score, Some(1));
    }

    #[test]
    fn test_invalid_quiz_leaves_state_untouched() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("styling");

        let err = state.mark_quiz_completed(&id, 4, 3, t(0)).unwrap_err();
        assert!(matches!(err, CoreError::ScoreOutOfRange { score: 4, total: 3, .. }));

        let err = state.mark_quiz_completed(&id, 0, 0, t(0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuizTotal { .. }));

        assert!(state.is_empty());
    }

    #[test]
    fn test_update_last_accessed_keeps_completion() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("navigation");

        state.update_last_accessed(&id, t(0));
        let progress = state.get("navigation");
        assert!(!progress.completed);
        assert!(!progress.quiz_completed);
        assert!(progress.last_accessed_at.is_some());

        state.mark_quiz_completed(&id, 3, 3, t(1)).unwrap();
        state.update_last_accessed(&id, t(2));
        let progress = state.get("navigation");
        assert!(progress.completed);
        assert_eq!(progress.quiz_score, Some(3));
        assert_eq!(progress.last_accessed_at, Some(t(2)));
    }

    #[test]
    fn test_last_accessed_never_goes_backwards() {
        let mut state = ProgressState::new();
        let id = ModuleId::new("navigation");

        state.update_last_accessed(&id, t(10));
        state.mark_module_completed(&id, t(10) - Duration::seconds(30));
        assert_eq!(state.get("navigation").last_accessed_at, Some(t(10)));
    }

    #[test]
    fn test_reset_and_default_lookup() {
        let mut state = ProgressState::new();
        state.mark_module_completed(&ModuleId::new("react-basics"), t(0));
        state.reset();

        assert!(state.is_empty());
        assert!(state.get("react-basics").is_untouched());
    }

    #[test]
    fn test_json_shape() {
        let mut state = ProgressState::new();
        state.mark_module_completed(&ModuleId::new("react-basics"), t(0));

        let value = serde_json::to_value(&state).unwrap();
        let entry = &value["moduleProgress"]["react-basics"];
        assert_eq!(entry["completed"], true);
        assert_eq!(entry["quizCompleted"], false);
        assert!(entry.get("quizScore").is_none());
        assert!(entry["lastAccessedAt"].as_str().unwrap().starts_with("2023-11-14T"));
    }

    #[test]
    fn test_loads_records_missing_fields() {
        let json = r#"{
            "moduleProgress": {
                "react-basics": { "completed": true, "lastAccessedAt": "2024-05-01T10:00:00.000Z" },
                "styling": { "completed": true, "quizCompleted": true, "quizScore": 2, "extra": 1 }
            }
        }"#;
        let state: ProgressState = serde_json::from_str(json).unwrap();

        let basics = state.get("react-basics");
        assert!(basics.completed);
        assert!(!basics.quiz_completed);
        assert!(basics.last_accessed_at.is_some());

        let styling = state.get("styling");
        assert_eq!(styling.quiz_score, Some(2));
        assert_eq!(styling.quiz_total, None);
    }
}
