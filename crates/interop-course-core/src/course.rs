//! The course: composition root that owns the learner state and wires the
//! engines to the presentation layer.
//!
//! Every mutation goes through a short-lived engine that borrows the state
//! held by the [`ProgressStore`]; there is no other copy of the state. Each
//! operation that changes the state saves it before returning.

use std::time::{Duration, Instant};

use crate::achievements::{self, AchievementEngine};
use crate::challenge::{SolutionAnalysis, SolutionChallenge, SolutionEvaluation};
use crate::completion::{completion_message, is_ready, CompletionEngine, CompletionOutcome};
use crate::content::CourseContent;
use crate::error::CourseError;
use crate::evaluator::{AnswerEvaluator, Evaluation};
use crate::model::{ComponentId, LearnerState, ModuleId, PathwayKey, QuestionId, ScenarioId};
use crate::progress::{LoadOutcome, ProgressStore};
use crate::scenario::{PathwayOutcome, ScenarioCompletion, ScenarioScorer};
use crate::summary::CourseSummary;
use crate::traits::{Presentation, SnapshotStore};

/// Tracks time spent in the current session on top of what was loaded.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    base: u64,
    started: Instant,
}

impl SessionClock {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            started: Instant::now(),
        }
    }

    /// Total seconds for a session that has lasted `elapsed`.
    pub fn total(&self, elapsed: Duration) -> u64 {
        self.base.saturating_add(elapsed.as_secs())
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

pub struct Course<P: Presentation> {
    progress: ProgressStore,
    content: CourseContent,
    presentation: P,
    challenge: SolutionChallenge,
    /// Set once a solution evaluation in this session offered the final
    /// module's completion.
    solution_ready: bool,
    clock: SessionClock,
}

impl<P: Presentation> Course<P> {
    /// Create a course with an empty learner state. Call [`Course::load`] to
    /// restore saved progress.
    pub fn new(content: CourseContent, store: Box<dyn SnapshotStore>, presentation: P) -> Self {
        Self {
            progress: ProgressStore::new(store),
            content,
            presentation,
            challenge: SolutionChallenge::new(),
            solution_ready: false,
            clock: SessionClock::new(0),
        }
    }

    /// Restore saved progress and restart the session clock from the loaded
    /// time.
    pub fn load(&mut self) -> LoadOutcome {
        let outcome = self.progress.load();
        self.clock = SessionClock::new(self.progress.state().time_spent());
        outcome
    }

    pub fn state(&self) -> &LearnerState {
        self.progress.state()
    }

    pub fn content(&self) -> &CourseContent {
        &self.content
    }

    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    pub fn challenge(&self) -> &SolutionChallenge {
        &self.challenge
    }

    pub fn save(&mut self) {
        self.progress.save();
    }

    // -- Quizzes ------------------------------------------------------------

    /// Grade an answer, mark the question as answered and offer completion
    /// once every question of the module has a selection.
    pub fn submit_answer(
        &mut self,
        module: ModuleId,
        question: QuestionId,
        answer: &str,
    ) -> Result<Evaluation, CourseError> {
        let evaluation =
            AnswerEvaluator::new(self.progress.state_mut(), &self.content).evaluate(
                module, question, answer,
            )?;
        self.presentation.mark_selected(module, question);
        self.progress.save();

        if self.is_module_ready(module) {
            self.presentation.reveal_complete_action(module);
        }
        Ok(evaluation)
    }

    /// Whether the module's completion action is on offer. The final module
    /// is also ready after a solution evaluation worth enough points.
    pub fn is_module_ready(&self, module: ModuleId) -> bool {
        (module == ModuleId::Master && self.solution_ready)
            || is_ready(&self.content, module, self.presentation.answered_count(module))
    }

    pub fn complete_module(&mut self, module: ModuleId) -> Result<CompletionOutcome, CourseError> {
        let outcome = CompletionEngine::new(self.progress.state_mut(), &self.content)
            .complete(module)
            .inspect_err(|e| tracing::warn!("rejected completion: {e}"))?;

        if let CompletionOutcome::Completed {
            achievement,
            unlocked,
            ..
        } = &outcome
        {
            self.progress.save();
            if let Some(id) = achievement {
                self.notify_achievement(id);
            }
            if let Some(next) = unlocked {
                self.presentation.module_unlocked(*next);
            }
            self.presentation.acknowledge(&completion_message(module));
        }
        Ok(outcome)
    }

    // -- Achievements -------------------------------------------------------

    /// Grant an achievement directly. Returns `false` if it was already held.
    pub fn grant(&mut self, id: &str) -> bool {
        let granted = AchievementEngine::new(self.progress.state_mut(), &self.content).grant(id);
        if granted {
            self.progress.save();
            self.notify_achievement(id);
        }
        granted
    }

    fn notify_achievement(&mut self, id: &str) {
        let notice = achievements::notice(&self.content, id);
        self.presentation.achievement_earned(&notice);
    }

    // -- Scenarios ----------------------------------------------------------

    pub fn select_pathway(
        &mut self,
        scenario: ScenarioId,
        pathway: PathwayKey,
    ) -> Result<PathwayOutcome, CourseError> {
        let outcome = ScenarioScorer::new(self.progress.state_mut(), &self.content)
            .select_pathway(scenario, pathway)?;
        self.progress.save();
        self.presentation.pathway_summary(&outcome);
        Ok(outcome)
    }

    pub fn complete_scenario(
        &mut self,
        scenario: ScenarioId,
    ) -> Result<ScenarioCompletion, CourseError> {
        let completion = ScenarioScorer::new(self.progress.state_mut(), &self.content)
            .complete_scenario(scenario)?;
        self.progress.save();
        if let Some(id) = &completion.achievement {
            self.notify_achievement(id);
        }
        Ok(completion)
    }

    // -- Solution challenge -------------------------------------------------

    /// Toggle a component in the solution builder. Returns whether it is now
    /// selected.
    pub fn toggle_component(&mut self, component: ComponentId) -> bool {
        let selected = self.challenge.toggle(component);
        let analysis = self.challenge.analyze();
        self.presentation
            .solution_changed(self.challenge.selected(), &analysis);
        selected
    }

    /// Select each component that is not selected yet. Repeats in `components`
    /// are ignored rather than toggled back off.
    pub fn select_components(&mut self, components: impl IntoIterator<Item = ComponentId>) {
        for component in components {
            if !self.challenge.contains(component) {
                self.toggle_component(component);
            }
        }
    }

    pub fn analyze_solution(&self) -> SolutionAnalysis {
        self.challenge.analyze()
    }

    /// Score the current selection and award its points.
    pub fn evaluate_solution(&mut self) -> SolutionEvaluation {
        let evaluation = self.challenge.evaluate();
        self.progress
            .state_mut()
            .add_points(evaluation.points_awarded);
        self.progress.save();

        tracing::debug!(
            score = evaluation.score,
            points = evaluation.points_awarded,
            "solution evaluated"
        );

        self.presentation.solution_evaluated(&evaluation);
        if evaluation.unlocks_final_completion() {
            self.solution_ready = true;
            self.presentation.reveal_complete_action(ModuleId::Master);
        }
        evaluation
    }

    // -- Time and summary ---------------------------------------------------

    /// Update `timeSpent` from the session clock. Not persisted until the
    /// next save.
    pub fn tick(&mut self) {
        let elapsed = self.clock.elapsed();
        self.record_elapsed(elapsed);
    }

    /// Set `timeSpent` to the loaded time plus `elapsed`.
    pub fn record_elapsed(&mut self, elapsed: Duration) {
        self.progress.state_mut().time_spent = self.clock.total(elapsed);
    }

    pub fn summary(&self) -> CourseSummary {
        CourseSummary::build(self.state(), &self.content, |m| {
            self.presentation.answered_count(m)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    use crate::achievements::{AchievementNotice, STANDARDS_SCHOLAR};
    use crate::memory::MemoryStore;

    #[derive(Default)]
    struct Recording {
        selected: BTreeMap<ModuleId, BTreeSet<QuestionId>>,
        revealed: Vec<ModuleId>,
        notices: Vec<AchievementNotice>,
        unlocked: Vec<ModuleId>,
        pathways: Vec<PathwayOutcome>,
        evaluations: Vec<SolutionEvaluation>,
        changes: usize,
        messages: Vec<String>,
    }

    impl Presentation for Recording {
        fn answered_count(&self, module: ModuleId) -> usize {
            self.selected.get(&module).map_or(0, BTreeSet::len)
        }
        fn mark_selected(&mut self, module: ModuleId, question: QuestionId) {
            self.selected.entry(module).or_default().insert(question);
        }
        fn reveal_complete_action(&mut self, module: ModuleId) {
            self.revealed.push(module);
        }
        fn achievement_earned(&mut self, notice: &AchievementNotice) {
            self.notices.push(notice.clone());
        }
        fn module_unlocked(&mut self, module: ModuleId) {
            self.unlocked.push(module);
        }
        fn pathway_summary(&mut self, outcome: &PathwayOutcome) {
            self.pathways.push(outcome.clone());
        }
        fn solution_changed(&mut self, _: &[ComponentId], _: &SolutionAnalysis) {
            self.changes += 1;
        }
        fn solution_evaluated(&mut self, evaluation: &SolutionEvaluation) {
            self.evaluations.push(*evaluation);
        }
        fn acknowledge(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn course() -> (Arc<MemoryStore>, Course<Recording>) {
        let memory = Arc::new(MemoryStore::new());
        let course = Course::new(
            CourseContent::builtin().unwrap(),
            Box::new(Arc::clone(&memory)),
            Recording::default(),
        );
        (memory, course)
    }

    #[test]
    fn answering_every_question_reveals_completion() {
        let (memory, mut course) = course();
        course
            .submit_answer(ModuleId::Foundation, QuestionId::Q1, "semantic")
            .unwrap();
        course
            .submit_answer(ModuleId::Foundation, QuestionId::Q2, "wrong")
            .unwrap();
        assert!(course.presentation().revealed.is_empty());

        course
            .submit_answer(ModuleId::Foundation, QuestionId::Q3, "false")
            .unwrap();
        assert_eq!(course.presentation().revealed, vec![ModuleId::Foundation]);
        assert_eq!(course.state().total_points(), 20);
        assert_eq!(memory.save_count(), 3);
    }

    #[test]
    fn completing_foundation_notifies_and_unlocks() {
        let (memory, mut course) = course();
        course.complete_module(ModuleId::Foundation).unwrap();
        let again = course.complete_module(ModuleId::Foundation).unwrap();

        assert_eq!(again.points_awarded(), 0);
        assert_eq!(course.state().total_points(), 100);
        let p = course.presentation();
        assert_eq!(p.notices.len(), 1);
        assert_eq!(p.notices[0].id, STANDARDS_SCHOLAR);
        assert_eq!(p.unlocked, vec![ModuleId::Standards]);
        assert_eq!(
            p.messages,
            vec!["Foundation module completed! Standards Deep Dive module is now unlocked."]
        );
        assert_eq!(memory.save_count(), 1);
    }

    #[test]
    fn out_of_sequence_completion_changes_nothing() {
        let (memory, mut course) = course();
        let err = course.complete_module(ModuleId::Interoperability).unwrap_err();
        assert!(!err.is_content_mismatch());
        assert_eq!(course.state(), &LearnerState::default());
        assert_eq!(memory.save_count(), 0);
    }

    #[test]
    fn grant_notifies_only_once() {
        let (_, mut course) = course();
        assert!(course.grant("FHIR Master"));
        assert!(!course.grant("FHIR Master"));
        assert_eq!(course.presentation().notices.len(), 1);
        assert_eq!(course.state().total_points(), 0);
    }

    #[test]
    fn pathway_and_scenario_flow() {
        let (_, mut course) = course();
        course
            .select_pathway(ScenarioId::DiabeticEd, PathwayKey::FullInterop)
            .unwrap();
        course.complete_scenario(ScenarioId::DiabeticEd).unwrap();
        course
            .complete_scenario(ScenarioId::MedicationReconciliation)
            .unwrap();

        assert_eq!(course.state().total_points(), 20);
        let p = course.presentation();
        assert_eq!(p.pathways.len(), 1);
        assert_eq!(p.notices.len(), 1);
        assert_eq!(p.notices[0].id, "Clinical Connector");
    }

    #[test]
    fn good_solution_reveals_master_completion() {
        let (_, mut course) = course();
        course.toggle_component(ComponentId::Hl7Fhir);
        course.toggle_component(ComponentId::Rxnorm);
        let result = course.evaluate_solution();

        assert_eq!(result.score, 50);
        assert_eq!(course.state().total_points(), 50);
        let p = course.presentation();
        assert_eq!(p.changes, 2);
        assert_eq!(p.revealed, vec![ModuleId::Master]);
    }

    #[test]
    fn master_ready_through_quiz_or_solution() {
        let (_, mut course) = course();
        assert!(!course.is_module_ready(ModuleId::Master));

        course.select_components([ComponentId::Loinc]);
        course.evaluate_solution();
        assert!(!course.is_module_ready(ModuleId::Master));

        course.select_components([ComponentId::Hl7Fhir, ComponentId::Rxnorm]);
        course.evaluate_solution();
        assert!(course.is_module_ready(ModuleId::Master));
        assert!(!course.is_module_ready(ModuleId::Scenarios));

        // Stays on offer after the selection changes
        course.toggle_component(ComponentId::Rxnorm);
        assert!(course.is_module_ready(ModuleId::Master));
    }

    #[test]
    fn select_components_ignores_repeats() {
        let (_, mut course) = course();
        course.select_components([ComponentId::Hl7Fhir, ComponentId::Hl7Fhir]);
        assert_eq!(course.challenge().selected(), &[ComponentId::Hl7Fhir]);

        course.select_components([ComponentId::Rxnorm, ComponentId::Hl7Fhir]);
        assert_eq!(
            course.challenge().selected(),
            &[ComponentId::Hl7Fhir, ComponentId::Rxnorm]
        );
        assert_eq!(course.presentation().changes, 2);
    }

    #[test]
    fn weak_solution_awards_points_without_reveal() {
        let (_, mut course) = course();
        course.toggle_component(ComponentId::Loinc);
        let result = course.evaluate_solution();
        assert_eq!(result.points_awarded, 15);
        assert!(course.presentation().revealed.is_empty());
        assert_eq!(course.state().total_points(), 15);
    }

    #[test]
    fn time_accumulates_on_loaded_value() {
        let memory = Arc::new(MemoryStore::with_snapshot(r#"{"timeSpent": 600}"#));
        let mut course = Course::new(
            CourseContent::builtin().unwrap(),
            Box::new(Arc::clone(&memory)),
            Recording::default(),
        );
        course.load();
        course.record_elapsed(Duration::from_secs(42));
        assert_eq!(course.state().time_spent(), 642);
        course.record_elapsed(Duration::from_secs(50));
        assert_eq!(course.state().time_spent(), 650);
    }

    #[test]
    fn progress_survives_a_new_session() {
        let (memory, mut course) = course();
        course.complete_module(ModuleId::Foundation).unwrap();
        course
            .submit_answer(ModuleId::Standards, QuestionId::Q1, "hl7v2")
            .unwrap();

        let mut resumed = Course::new(
            CourseContent::builtin().unwrap(),
            Box::new(Arc::clone(&memory)),
            Recording::default(),
        );
        assert!(matches!(resumed.load(), LoadOutcome::Restored { .. }));
        assert_eq!(resumed.state().total_points(), 110);
        assert!(resumed.state().has_achievement(STANDARDS_SCHOLAR));
        assert_eq!(resumed.summary().completion_percent, 20);
    }
}
