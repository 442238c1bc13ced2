//! The `interop-course validate` command.

use std::path::PathBuf;

use anyhow::Result;

use interop_course_core::content::CourseContent;
use interop_course_core::model::ModuleId;
use interop_course_core::parser::{parse_content, validate_content};

use crate::session::{load_content, Settings};

pub fn execute(settings: &Settings, content_path: Option<PathBuf>) -> Result<()> {
    let content = match content_path {
        Some(path) => parse_content(&path)?,
        None => load_content(&settings.load_config()?)?,
    };

    print_overview(&content);

    let warnings = validate_content(&content);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|s| format!("  [{s}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Course content valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

fn print_overview(content: &CourseContent) {
    let questions: usize = ModuleId::ALL
        .into_iter()
        .map(|m| content.question_count(m))
        .sum();
    let pathways: usize = content.scenarios.values().map(|s| s.pathways.len()).sum();
    println!(
        "Course: {} ({questions} questions, {} scenarios, {pathways} pathways, {} achievements)",
        content.title,
        content.scenarios.len(),
        content.achievements.len(),
    );
}
