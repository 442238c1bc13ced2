//! The `interop-course answer` command.

use anyhow::Result;

use interop_course_core::model::{ModuleId, ModuleStatus, QuestionId};
use interop_course_core::traits::Presentation;

use crate::session::{Session, Settings};

pub fn execute(
    settings: &Settings,
    module: ModuleId,
    question: QuestionId,
    choice: &str,
) -> Result<()> {
    let mut session = Session::open(settings)?;
    let course = &mut session.course;

    if course.state().module_status(module) == ModuleStatus::Locked {
        let prerequisite = module.prerequisite().map_or("", |p| p.title());
        anyhow::bail!(
            "{} is locked; complete {prerequisite} first",
            module.title()
        );
    }

    let evaluation = course.submit_answer(module, question, choice)?;
    if evaluation.correct {
        println!("Correct! {}", evaluation.feedback);
        println!("+{} points", evaluation.points_awarded);
    } else {
        println!("Incorrect. {}", evaluation.feedback);
    }

    println!(
        "{}: {}/{} questions answered",
        module.title(),
        course.presentation().answered_count(module),
        course.content().question_count(module),
    );

    session.finish();
    Ok(())
}
