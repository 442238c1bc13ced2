//! The `interop-course finish-scenario` command.

use anyhow::Result;

use interop_course_core::model::ScenarioId;
use interop_course_core::scenario::CLINICAL_CONNECTOR_THRESHOLD;

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings, scenario: ScenarioId) -> Result<()> {
    let mut session = Session::open(settings)?;

    let completion = session.course.complete_scenario(scenario)?;
    let title = &session.course.content().scenario(scenario)?.title;
    println!(
        "Scenario recorded: {title} ({}/{CLINICAL_CONNECTOR_THRESHOLD} scenarios completed)",
        completion.completed.min(CLINICAL_CONNECTOR_THRESHOLD)
    );

    session.finish();
    Ok(())
}
