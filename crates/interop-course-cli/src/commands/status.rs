//! The `interop-course status` command.

use anyhow::Result;
use chrono::Utc;
use comfy_table::{Cell, Table};

use interop_course_core::summary::{format_time_spent, CourseSummary};

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings, format: &str) -> Result<()> {
    let session = Session::open(settings)?;
    let summary = session.course.summary();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "text" => print_text(&summary, session.config.learner_name.as_deref()),
        other => anyhow::bail!("unknown format '{other}' (expected text or json)"),
    }

    Ok(())
}

fn print_text(summary: &CourseSummary, learner: Option<&str>) {
    match learner {
        Some(name) => println!("{} ({name})", summary.title),
        None => println!("{}", summary.title),
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Module", "Status", "Answered"]);
    for (i, m) in summary.modules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&m.title),
            Cell::new(m.status),
            Cell::new(format!("{}/{}", m.answered, m.total)),
        ]);
    }
    println!("{table}");

    println!(
        "\nProgress: {}% | Points: {} | Achievements: {}/{} | Scenarios: {} | Time: {}",
        summary.completion_percent,
        summary.total_points,
        summary.earned_count(),
        summary.achievements.len(),
        summary.scenarios_completed,
        format_time_spent(summary.time_spent),
    );

    if let Some(saved) = summary.last_saved {
        let minutes = (Utc::now() - saved).num_minutes().max(0);
        println!(
            "Last saved: {} ({minutes} min ago)",
            saved.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}
