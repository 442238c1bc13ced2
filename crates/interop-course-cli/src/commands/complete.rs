//! The `interop-course complete` command.

use anyhow::Result;

use interop_course_core::challenge::FINAL_COMPLETION_THRESHOLD;
use interop_course_core::completion::CompletionOutcome;
use interop_course_core::model::{ComponentId, ModuleId, ModuleStatus};
use interop_course_core::traits::Presentation;

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings, module: ModuleId, components: &[ComponentId]) -> Result<()> {
    if !components.is_empty() && module != ModuleId::Master {
        anyhow::bail!("--components only applies to the master module");
    }

    let mut session = Session::open(settings)?;
    let course = &mut session.course;

    // Locked modules fall through so the engine reports the sequencing error.
    if course.state().module_status(module) == ModuleStatus::Unlocked {
        if !components.is_empty() {
            course.select_components(components.iter().copied());
            course.evaluate_solution();
        }

        if !course.is_module_ready(module) {
            let answered = course.presentation().answered_count(module);
            let total = course.content().question_count(module);
            if module == ModuleId::Master {
                anyhow::bail!(
                    "answer every question of {} ({answered}/{total} answered) or pass \
                     --components with a solution worth at least {FINAL_COMPLETION_THRESHOLD} points",
                    module.title(),
                );
            }
            anyhow::bail!(
                "answer every question of {} before completing it ({answered}/{total} answered)",
                module.title(),
            );
        }
    }

    match course.complete_module(module)? {
        CompletionOutcome::Completed { points_awarded, .. } => {
            println!(
                "+{points_awarded} points (total {})",
                course.state().total_points()
            );
        }
        CompletionOutcome::AlreadyCompleted { .. } => {
            println!("{} is already completed.", module.title());
        }
    }

    session.finish();
    Ok(())
}
