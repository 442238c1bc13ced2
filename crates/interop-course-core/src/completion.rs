//! Module completion engine: readiness checks and the gated completion
//! transition.

use serde::{Deserialize, Serialize};

use crate::achievements::AchievementEngine;
use crate::content::CourseContent;
use crate::error::CourseError;
use crate::model::{LearnerState, ModuleId};

/// Whether every question of `module` has a selection.
///
/// `answered` comes from the presentation layer's selection marks, not from
/// the recorded attempt history, so it is independent of correctness.
pub fn is_ready(content: &CourseContent, module: ModuleId, answered: usize) -> bool {
    let total = content.question_count(module);
    total > 0 && answered == total
}

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CompletionOutcome {
    /// The module was completed by this call.
    Completed {
        module: ModuleId,
        points_awarded: u32,
        /// The module's achievement, if this call granted it.
        achievement: Option<String>,
        /// The module unlocked by this completion.
        unlocked: Option<ModuleId>,
    },
    /// The module was already complete; nothing changed.
    AlreadyCompleted { module: ModuleId },
}

impl CompletionOutcome {
    pub fn points_awarded(&self) -> u32 {
        match self {
            CompletionOutcome::Completed { points_awarded, .. } => *points_awarded,
            CompletionOutcome::AlreadyCompleted { .. } => 0,
        }
    }
}

/// Applies completion transitions to a learner state.
pub struct CompletionEngine<'a> {
    state: &'a mut LearnerState,
    content: &'a CourseContent,
}

impl<'a> CompletionEngine<'a> {
    pub fn new(state: &'a mut LearnerState, content: &'a CourseContent) -> Self {
        Self { state, content }
    }

    /// Complete `module`: set its flag, add its bonus and grant its
    /// achievement.
    ///
    /// Completion is one-shot. Repeating it returns
    /// [`CompletionOutcome::AlreadyCompleted`] without awarding anything.
    /// Completing a module whose predecessor is not complete fails with
    /// [`CourseError::OutOfSequence`].
    pub fn complete(&mut self, module: ModuleId) -> Result<CompletionOutcome, CourseError> {
        if let Some(prerequisite) = module.prerequisite() {
            if !self.state.is_complete(prerequisite) {
                return Err(CourseError::OutOfSequence {
                    module,
                    prerequisite,
                });
            }
        }

        if self.state.is_complete(module) {
            tracing::debug!(%module, "module already completed");
            return Ok(CompletionOutcome::AlreadyCompleted { module });
        }

        self.state.module_completion[module.index()] = true;
        let points_awarded = module.completion_bonus();
        self.state.add_points(points_awarded);

        let achievement_id = module.completion_achievement();
        let granted = AchievementEngine::new(self.state, self.content).grant(achievement_id);

        tracing::debug!(%module, points_awarded, "module completed");

        Ok(CompletionOutcome::Completed {
            module,
            points_awarded,
            achievement: granted.then(|| achievement_id.to_string()),
            unlocked: module.next(),
        })
    }
}

/// Acknowledgement text shown after completing a module.
pub fn completion_message(module: ModuleId) -> String {
    match module.next() {
        Some(next) => format!(
            "{} module completed! {} module is now unlocked.",
            module.title(),
            next.title()
        ),
        None => format!(
            "{} completed! Congratulations on completing the entire course!",
            module.title()
        ),
    }
}
