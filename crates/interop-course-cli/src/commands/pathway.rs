//! The `interop-course pathway` command.

use anyhow::Result;

use interop_course_core::model::{PathwayKey, ScenarioId};

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings, scenario: ScenarioId, pathway: PathwayKey) -> Result<()> {
    let mut session = Session::open(settings)?;

    let title = &session.course.content().scenario(scenario)?.title;
    println!("Scenario: {title}\n");

    session.course.select_pathway(scenario, pathway)?;
    println!("Total points: {}", session.course.state().total_points());

    session.finish();
    Ok(())
}
