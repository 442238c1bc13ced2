//! The `interop-course init` command.

use anyhow::Result;

use interop_course_store::config::LOCAL_CONFIG_FILE;

pub fn execute() -> Result<()> {
    if std::path::Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    println!("\nNext steps:");
    println!("  1. Run: interop-course status");
    println!("  2. Run: interop-course answer --module foundation --question 1 --choice semantic");
    println!("  3. Run: interop-course achievements");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# interop-course configuration

# Where saved progress lives
data_dir = "./interop-course-data"
snapshot_file = "progress.json"

# Optional custom course content (defaults to the built-in course)
# content = "./my-course.toml"

# learner_name = "${USER}"
"#;
