//! The `interop-course achievements` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::session::{Session, Settings};

pub fn execute(settings: &Settings) -> Result<()> {
    let session = Session::open(settings)?;
    let summary = session.course.summary();

    let mut table = Table::new();
    table.set_header(vec!["", "Achievement", "Description", "Points", "Earned"]);
    for badge in &summary.achievements {
        table.add_row(vec![
            Cell::new(badge.icon.as_deref().unwrap_or("")),
            Cell::new(&badge.id),
            Cell::new(badge.description.as_deref().unwrap_or("")),
            Cell::new(badge.points.map(|p| p.to_string()).unwrap_or_default()),
            Cell::new(if badge.earned { "yes" } else { "no" }),
        ]);
    }
    println!("{table}");

    println!(
        "\n{}/{} earned",
        summary.earned_count(),
        summary.achievements.len()
    );
    Ok(())
}
