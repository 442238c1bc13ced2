//! Read-only course summary for rendering.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::achievements::{board, BadgeEntry};
use crate::content::CourseContent;
use crate::model::{LearnerState, ModuleId, ModuleStatus, MODULE_COUNT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSummary {
    pub module: ModuleId,
    pub title: String,
    pub status: ModuleStatus,
    /// Questions carrying a selection.
    pub answered: usize,
    /// Questions defined for the module.
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub title: String,
    pub completion_percent: u32,
    pub modules: Vec<ModuleSummary>,
    pub total_points: u32,
    pub achievements: Vec<BadgeEntry>,
    pub scenarios_completed: usize,
    pub time_spent: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved: Option<DateTime<Utc>>,
}

impl CourseSummary {
    /// Build a summary. `answered` reports the selection count per module.
    pub fn build(
        state: &LearnerState,
        content: &CourseContent,
        answered: impl Fn(ModuleId) -> usize,
    ) -> Self {
        let modules = ModuleId::ALL
            .into_iter()
            .map(|module| ModuleSummary {
                module,
                title: module.title().to_string(),
                status: state.module_status(module),
                answered: answered(module),
                total: content.question_count(module),
            })
            .collect();

        Self {
            title: content.title.clone(),
            completion_percent: (state.completed_count() * 100 / MODULE_COUNT) as u32,
            modules,
            total_points: state.total_points(),
            achievements: board(state, content),
            scenarios_completed: state.scenarios_completed().len(),
            time_spent: state.time_spent(),
            last_saved: state.last_saved(),
        }
    }

    pub fn earned_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.earned).count()
    }
}

/// Format seconds as `M:SS`, or `H:MM:SS` past the hour.
pub fn format_time_spent(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_fresh_state() {
        let content = CourseContent::builtin().unwrap();
        let state = LearnerState::default();
        let summary = CourseSummary::build(&state, &content, |_| 0);

        assert_eq!(summary.completion_percent, 0);
        assert_eq!(summary.modules.len(), 5);
        assert_eq!(summary.modules[0].status, ModuleStatus::Unlocked);
        assert_eq!(summary.modules[1].status, ModuleStatus::Locked);
        assert_eq!(summary.modules[0].total, 3);
        assert_eq!(summary.earned_count(), 0);
        assert_eq!(summary.achievements.len(), 6);
    }

    #[test]
    fn summary_reflects_progress() {
        let content = CourseContent::builtin().unwrap();
        let mut state = LearnerState::default();
        state.module_completion = [true, true, false, false, false];
        state.achievements = vec!["Standards Scholar".into()];
        let summary = CourseSummary::build(&state, &content, |m| {
            if m == ModuleId::Interoperability {
                2
            } else {
                0
            }
        });

        assert_eq!(summary.completion_percent, 40);
        assert_eq!(summary.modules[1].status, ModuleStatus::Completed);
        assert_eq!(summary.modules[2].status, ModuleStatus::Unlocked);
        assert_eq!(summary.modules[2].answered, 2);
        assert_eq!(summary.earned_count(), 1);
    }

    #[test]
    fn summary_serializes_camel_case() {
        let content = CourseContent::builtin().unwrap();
        let summary = CourseSummary::build(&LearnerState::default(), &content, |_| 0);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["completionPercent"], 0);
        assert_eq!(json["modules"][0]["module"], "foundation");
        assert!(json.get("lastSaved").is_none());
    }

    #[test]
    fn time_formatting() {
        assert_eq!(format_time_spent(0), "0:00");
        assert_eq!(format_time_spent(75), "1:15");
        assert_eq!(format_time_spent(3_725), "1:02:05");
    }
}
