//! Collaborator traits: snapshot persistence and the presentation layer.
//!
//! The engine never renders anything and never touches storage directly.
//! Hosts (the CLI, a browser shell, tests) implement these traits and hand
//! them to [`Course`](crate::course::Course).

use std::sync::Arc;

use crate::achievements::AchievementNotice;
use crate::challenge::{SolutionAnalysis, SolutionEvaluation};
use crate::model::{ComponentId, ModuleId, QuestionId};
use crate::scenario::PathwayOutcome;

// ---------------------------------------------------------------------------
// Snapshot persistence
// ---------------------------------------------------------------------------

/// Storage for the serialized learner snapshot.
pub trait SnapshotStore {
    /// Read the last saved snapshot, or `None` if nothing was saved yet.
    fn load_snapshot(&self) -> anyhow::Result<Option<String>>;

    /// Replace the stored snapshot.
    fn save_snapshot(&self, snapshot: &str) -> anyhow::Result<()>;
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Arc<T> {
    fn load_snapshot(&self) -> anyhow::Result<Option<String>> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, snapshot: &str) -> anyhow::Result<()> {
        (**self).save_snapshot(snapshot)
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for Box<T> {
    fn load_snapshot(&self) -> anyhow::Result<Option<String>> {
        (**self).load_snapshot()
    }

    fn save_snapshot(&self, snapshot: &str) -> anyhow::Result<()> {
        (**self).save_snapshot(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Presentation layer
// ---------------------------------------------------------------------------

/// Rendering and input-state capabilities the engine calls back into.
pub trait Presentation {
    /// How many questions of `module` currently carry a selection.
    fn answered_count(&self, module: ModuleId) -> usize;

    /// An option was chosen for a question.
    fn mark_selected(&mut self, module: ModuleId, question: QuestionId);

    /// Every question of the module has a selection; offer completion.
    fn reveal_complete_action(&mut self, module: ModuleId);

    fn achievement_earned(&mut self, notice: &AchievementNotice);

    fn module_unlocked(&mut self, module: ModuleId);

    fn pathway_summary(&mut self, outcome: &PathwayOutcome);

    /// The solution builder selection changed.
    fn solution_changed(&mut self, selected: &[ComponentId], analysis: &SolutionAnalysis);

    fn solution_evaluated(&mut self, evaluation: &SolutionEvaluation);

    /// Blocking acknowledgement dialog.
    fn acknowledge(&mut self, message: &str);
}

/// Presentation that renders nothing and reports no selections.
pub struct NoopPresentation;

impl Presentation for NoopPresentation {
    fn answered_count(&self, _: ModuleId) -> usize {
        0
    }
    fn mark_selected(&mut self, _: ModuleId, _: QuestionId) {}
    fn reveal_complete_action(&mut self, _: ModuleId) {}
    fn achievement_earned(&mut self, _: &AchievementNotice) {}
    fn module_unlocked(&mut self, _: ModuleId) {}
    fn pathway_summary(&mut self, _: &PathwayOutcome) {}
    fn solution_changed(&mut self, _: &[ComponentId], _: &SolutionAnalysis) {}
    fn solution_evaluated(&mut self, _: &SolutionEvaluation) {}
    fn acknowledge(&mut self, _: &str) {}
}
