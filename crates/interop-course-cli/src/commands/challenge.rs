//! The `interop-course challenge` command.

use anyhow::Result;

use interop_course_core::challenge::SolutionAnalysis;
use interop_course_core::model::ComponentId;

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings, components: &[ComponentId], analyze_only: bool) -> Result<()> {
    let mut session = Session::open(settings)?;
    let course = &mut session.course;

    course.select_components(components.iter().copied());

    println!("Selected standards:");
    if course.challenge().selected().is_empty() {
        println!("  (none)");
    }
    for component in course.challenge().selected() {
        println!("  {} - {}", component.name(), component.description());
    }

    print_analysis(course.challenge().selected().len(), &course.analyze_solution());

    if analyze_only {
        return Ok(());
    }

    course.evaluate_solution();
    println!("Total points: {}", course.state().total_points());

    session.finish();
    Ok(())
}

fn print_analysis(count: usize, analysis: &SolutionAnalysis) {
    println!("\nSolution Analysis");
    println!("  Standards Selected: {count}");
    println!("  Estimated Implementation Cost: {}", analysis.cost);
    println!("  Complexity Level: {}", analysis.complexity);
    println!("  Expected Benefits: {}", analysis.benefits_text());
    println!("  Key Risks: {}", analysis.risks_text());
}
