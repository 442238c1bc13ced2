//! Progress store: owns the learner state and persists it through a
//! [`SnapshotStore`].
//!
//! Persistence is best effort. A snapshot that is missing or malformed leaves
//! the default state in place; a failed save is logged and the in-memory state
//! stays authoritative for the rest of the session.

use std::collections::HashSet;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::model::LearnerState;
use crate::traits::SnapshotStore;

/// What happened during [`ProgressStore::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No snapshot was stored; defaults kept.
    Fresh,
    /// A snapshot was merged. `skipped` counts known fields whose values had
    /// the wrong shape and were left at their defaults.
    Restored { merged: usize, skipped: usize },
    /// The snapshot could not be read or was not a JSON object.
    Failed,
}

/// The single writer of [`LearnerState`].
pub struct ProgressStore {
    state: LearnerState,
    store: Box<dyn SnapshotStore>,
}

impl ProgressStore {
    /// Create a store with an empty learner state.
    pub fn new(store: Box<dyn SnapshotStore>) -> Self {
        Self {
            state: LearnerState::default(),
            store,
        }
    }

    pub fn state(&self) -> &LearnerState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut LearnerState {
        &mut self.state
    }

    /// Merge the persisted snapshot into the in-memory state, field by field.
    pub fn load(&mut self) -> LoadOutcome {
        let raw = match self.store.load_snapshot() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("no saved progress found, starting fresh");
                return LoadOutcome::Fresh;
            }
            Err(e) => {
                tracing::warn!("failed to read saved progress: {e:#}");
                return LoadOutcome::Failed;
            }
        };

        let map = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("saved progress is not an object, ignoring it");
                return LoadOutcome::Failed;
            }
            Err(e) => {
                tracing::warn!("saved progress is malformed, ignoring it: {e}");
                return LoadOutcome::Failed;
            }
        };

        // Merge into a scratch copy so a partially applied snapshot is never observed
        let mut merged_state = self.state.clone();
        let mut merged = 0usize;
        let mut skipped = 0usize;
        for (key, value) in map {
            let applied = match key.as_str() {
                "moduleCompletion" => merge_field(&mut merged_state.module_completion, &key, value),
                "totalPoints" => merge_field(&mut merged_state.total_points, &key, value),
                "achievements" => merge_field(&mut merged_state.achievements, &key, value),
                "scenariosCompleted" => {
                    merge_field(&mut merged_state.scenarios_completed, &key, value)
                }
                "quizAnswers" => merge_field(&mut merged_state.quiz_answers, &key, value),
                "timeSpent" => merge_field(&mut merged_state.time_spent, &key, value),
                "lastSaved" => merge_field(&mut merged_state.last_saved, &key, value),
                _ => {
                    tracing::debug!("ignoring unknown snapshot field '{key}'");
                    continue;
                }
            };
            if applied {
                merged += 1;
            } else {
                skipped += 1;
            }
        }

        normalize(&mut merged_state);
        self.state = merged_state;
        tracing::info!(
            points = self.state.total_points,
            completed = self.state.completed_count(),
            "restored saved progress"
        );
        LoadOutcome::Restored { merged, skipped }
    }

    /// Serialize the whole state to the snapshot store.
    pub fn save(&mut self) {
        self.state.last_saved = Some(Utc::now());
        let snapshot = match serde_json::to_string_pretty(&self.state) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!("failed to serialize progress: {e}");
                return;
            }
        };
        match self.store.save_snapshot(&snapshot) {
            Ok(()) => tracing::debug!(bytes = snapshot.len(), "progress saved"),
            Err(e) => tracing::error!("failed to save progress: {e:#}"),
        }
    }
}

fn merge_field<T: DeserializeOwned>(slot: &mut T, key: &str, value: Value) -> bool {
    match serde_json::from_value(value) {
        Ok(v) => {
            *slot = v;
            true
        }
        Err(e) => {
            tracing::warn!("keeping default for snapshot field '{key}': {e}");
            false
        }
    }
}

/// Re-establish invariants a hand-edited or foreign snapshot may break.
fn normalize(state: &mut LearnerState) {
    let mut seen = HashSet::new();
    let before = state.achievements.len();
    state.achievements.retain(|id| seen.insert(id.clone()));
    if state.achievements.len() != before {
        tracing::warn!("dropped duplicate achievements from saved progress");
    }

    // Completion must be a prefix of the course order
    if let Some(gap) = state.module_completion.iter().position(|done| !done) {
        if state.module_completion[gap..].iter().any(|done| *done) {
            tracing::warn!("saved progress skips module {gap}, clearing later completions");
            for done in &mut state.module_completion[gap..] {
                *done = false;
            }
        }
    }
}
