//! Scenario scorer: pathway selection and scenario completion.

use serde::{Deserialize, Serialize};

use crate::achievements::{AchievementEngine, CLINICAL_CONNECTOR};
use crate::content::{CourseContent, MetricKind};
use crate::error::CourseError;
use crate::model::{LearnerState, PathwayKey, ScenarioId};

/// Scenario completions, repeats included, that earn Clinical Connector.
pub const CLINICAL_CONNECTOR_THRESHOLD: usize = 2;

/// Consequences of choosing a pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayOutcome {
    pub scenario: ScenarioId,
    pub pathway: PathwayKey,
    pub title: String,
    pub metrics: Vec<(MetricKind, String)>,
    pub analysis: String,
    pub points_awarded: u32,
}

/// Result of finishing a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioCompletion {
    pub scenario: ScenarioId,
    /// Scenario completions recorded so far, including this one.
    pub completed: usize,
    /// Achievement granted by this call, if any.
    pub achievement: Option<String>,
}

pub struct ScenarioScorer<'a> {
    state: &'a mut LearnerState,
    content: &'a CourseContent,
}

impl<'a> ScenarioScorer<'a> {
    pub fn new(state: &'a mut LearnerState, content: &'a CourseContent) -> Self {
        Self { state, content }
    }

    /// Award the pathway's points and describe its consequences.
    ///
    /// Points are added on every call; choosing a second pathway in the same
    /// scenario does not take back the first one's points.
    pub fn select_pathway(
        &mut self,
        scenario: ScenarioId,
        pathway: PathwayKey,
    ) -> Result<PathwayOutcome, CourseError> {
        let entry = self.content.pathway(scenario, pathway)?;
        self.state.add_points(entry.points);

        tracing::debug!(%scenario, %pathway, points = entry.points, "pathway selected");

        Ok(PathwayOutcome {
            scenario,
            pathway,
            title: entry.title.clone(),
            metrics: entry.metrics.entries(),
            analysis: entry.analysis.clone(),
            points_awarded: entry.points,
        })
    }

    /// Record a finished scenario. Every completion counts toward Clinical
    /// Connector, so finishing the same scenario twice earns it.
    pub fn complete_scenario(
        &mut self,
        scenario: ScenarioId,
    ) -> Result<ScenarioCompletion, CourseError> {
        self.content.scenario(scenario)?;
        self.state.scenarios_completed.push(scenario);

        let completed = self.state.scenarios_completed.len();

        let mut achievement = None;
        if completed >= CLINICAL_CONNECTOR_THRESHOLD
            && AchievementEngine::new(self.state, self.content).grant(CLINICAL_CONNECTOR)
        {
            achievement = Some(CLINICAL_CONNECTOR.to_string());
        }

        tracing::debug!(%scenario, completed, "scenario completed");

        Ok(ScenarioCompletion {
            scenario,
            completed,
            achievement,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> CourseContent {
        CourseContent::builtin().unwrap()
    }

    #[test]
    fn full_interop_pathway_awards_twenty() {
        let content = content();
        let mut state = LearnerState::default();
        let outcome = ScenarioScorer::new(&mut state, &content)
            .select_pathway(ScenarioId::DiabeticEd, PathwayKey::FullInterop)
            .unwrap();

        assert_eq!(outcome.points_awarded, 20);
        assert_eq!(
            outcome.metrics,
            vec![
                (MetricKind::Time, "5 minutes".to_string()),
                (MetricKind::Cost, "$200".to_string()),
                (MetricKind::Risk, "Low".to_string()),
                (MetricKind::DuplicateTests, "0".to_string()),
            ]
        );
        assert!(outcome.analysis.starts_with("Full interoperability"));
        assert_eq!(state.total_points(), 20);
    }

    #[test]
    fn repeated_selection_compounds_points() {
        let content = content();
        let mut state = LearnerState::default();
        let mut scorer = ScenarioScorer::new(&mut state, &content);
        scorer
            .select_pathway(ScenarioId::MedicationReconciliation, PathwayKey::Manual)
            .unwrap();
        scorer
            .select_pathway(ScenarioId::MedicationReconciliation, PathwayKey::FullyAutomated)
            .unwrap();
        scorer
            .select_pathway(ScenarioId::MedicationReconciliation, PathwayKey::Manual)
            .unwrap();
        assert_eq!(state.total_points(), 5 + 20 + 5);
    }

    #[test]
    fn pathway_from_another_scenario_is_rejected() {
        let content = content();
        let mut state = LearnerState::default();
        let err = ScenarioScorer::new(&mut state, &content)
            .select_pathway(ScenarioId::DiabeticEd, PathwayKey::SemiAutomated)
            .unwrap_err();
        assert!(err.is_content_mismatch());
        assert_eq!(state.total_points(), 0);
    }

    #[test]
    fn clinical_connector_after_two_completions() {
        let content = content();
        let mut state = LearnerState::default();
        let mut scorer = ScenarioScorer::new(&mut state, &content);

        let first = scorer.complete_scenario(ScenarioId::DiabeticEd).unwrap();
        assert_eq!(first.achievement, None);
        assert_eq!(first.completed, 1);

        let second = scorer
            .complete_scenario(ScenarioId::MedicationReconciliation)
            .unwrap();
        assert_eq!(second.achievement.as_deref(), Some(CLINICAL_CONNECTOR));

        let again = scorer
            .complete_scenario(ScenarioId::MedicationReconciliation)
            .unwrap();
        assert_eq!(again.achievement, None);
        assert_eq!(again.completed, 3);

        assert!(state.has_achievement(CLINICAL_CONNECTOR));
        assert_eq!(state.total_points(), 0);
    }

    #[test]
    fn repeating_one_scenario_earns_clinical_connector() {
        let content = content();
        let mut state = LearnerState::default();
        let mut scorer = ScenarioScorer::new(&mut state, &content);

        scorer.complete_scenario(ScenarioId::DiabeticEd).unwrap();
        let repeat = scorer.complete_scenario(ScenarioId::DiabeticEd).unwrap();
        assert_eq!(repeat.completed, 2);
        assert_eq!(repeat.achievement.as_deref(), Some(CLINICAL_CONNECTOR));

        assert_eq!(
            state.scenarios_completed(),
            &[ScenarioId::DiabeticEd, ScenarioId::DiabeticEd]
        );
        assert!(state.has_achievement(CLINICAL_CONNECTOR));
    }

    #[test]
    fn undefined_scenario_is_not_recorded() {
        let mut content = content();
        content.scenarios.remove(&ScenarioId::DiabeticEd);
        let mut state = LearnerState::default();
        let err = ScenarioScorer::new(&mut state, &content)
            .complete_scenario(ScenarioId::DiabeticEd)
            .unwrap_err();
        assert_eq!(err, CourseError::UnknownScenario(ScenarioId::DiabeticEd));
        assert!(state.scenarios_completed().is_empty());
    }
}
