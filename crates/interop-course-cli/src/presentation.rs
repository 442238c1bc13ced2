//! Console presentation: prints engine events to stdout.

use std::collections::{BTreeMap, BTreeSet};

use comfy_table::{Cell, Table};

use interop_course_core::achievements::AchievementNotice;
use interop_course_core::challenge::{SolutionAnalysis, SolutionEvaluation};
use interop_course_core::model::{ComponentId, LearnerState, ModuleId, QuestionId};
use interop_course_core::scenario::PathwayOutcome;
use interop_course_core::traits::Presentation;

/// Prints course events and remembers which questions carry a selection.
#[derive(Default)]
pub struct ConsolePresentation {
    selected: BTreeMap<ModuleId, BTreeSet<QuestionId>>,
}

impl ConsolePresentation {
    /// Selections implied by the recorded answers of a previous session.
    pub fn selections_from(state: &LearnerState) -> BTreeMap<ModuleId, BTreeSet<QuestionId>> {
        state
            .quiz_answers()
            .iter()
            .map(|(module, attempts)| (*module, attempts.iter().map(|a| a.question).collect()))
            .collect()
    }

    pub fn restore_selections(&mut self, selected: BTreeMap<ModuleId, BTreeSet<QuestionId>>) {
        self.selected = selected;
    }
}

impl Presentation for ConsolePresentation {
    fn answered_count(&self, module: ModuleId) -> usize {
        self.selected.get(&module).map_or(0, BTreeSet::len)
    }

    fn mark_selected(&mut self, module: ModuleId, question: QuestionId) {
        self.selected.entry(module).or_default().insert(question);
    }

    fn reveal_complete_action(&mut self, module: ModuleId) {
        println!(
            "\n{} is ready to complete. Run `interop-course complete --module {module}`.",
            module.title()
        );
        if module == ModuleId::Master && self.answered_count(module) < QuestionId::ALL.len() {
            println!("Without the quiz, pass the same solution with --components.");
        }
    }

    fn achievement_earned(&mut self, notice: &AchievementNotice) {
        let icon = notice.icon.as_deref().unwrap_or("*");
        match &notice.description {
            Some(description) => {
                println!("\n{icon} Achievement unlocked: {} ({description})", notice.id)
            }
            None => println!("\n{icon} Achievement unlocked: {}", notice.id),
        }
    }

    fn module_unlocked(&mut self, module: ModuleId) {
        tracing::info!(%module, "module unlocked");
    }

    fn pathway_summary(&mut self, outcome: &PathwayOutcome) {
        println!("Consequences of {}", outcome.title);

        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        for (kind, value) in &outcome.metrics {
            table.add_row(vec![Cell::new(kind.label()), Cell::new(value)]);
        }
        println!("{table}");

        println!("\nAnalysis: {}", outcome.analysis);
        println!("+{} points", outcome.points_awarded);
    }

    fn solution_changed(&mut self, selected: &[ComponentId], analysis: &SolutionAnalysis) {
        let names: Vec<&str> = selected.iter().map(|c| c.name()).collect();
        tracing::debug!(
            selected = %names.join(", "),
            cost = %analysis.cost,
            complexity = %analysis.complexity,
            "solution changed"
        );
    }

    fn solution_evaluated(&mut self, evaluation: &SolutionEvaluation) {
        println!("\nSolution Evaluation:\n");
        println!("{}\n", evaluation.verdict.feedback());
        println!("Score: {}/100", evaluation.score);
        println!("Points Awarded: {}", evaluation.points_awarded);
    }

    fn acknowledge(&mut self, message: &str) {
        println!("\n{message}");
    }
}
