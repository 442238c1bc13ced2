//! The `interop-course reset` command.

use anyhow::{Context, Result};

use interop_course_store::JsonFileStore;

use crate::session::Settings;

pub fn execute(settings: &Settings) -> Result<()> {
    let config = settings.load_config()?;
    let store = JsonFileStore::new(config.snapshot_path());

    let removed = store
        .clear()
        .with_context(|| format!("failed to reset progress at {}", store.path().display()))?;
    if removed {
        println!("Cleared saved progress at {}", store.path().display());
    } else {
        println!("No saved progress at {}", store.path().display());
    }
    Ok(())
}
