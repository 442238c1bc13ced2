//! Opens a course session: config, content, saved progress.

use std::path::PathBuf;

use anyhow::{Context, Result};

use interop_course_core::content::CourseContent;
use interop_course_core::course::Course;
use interop_course_core::parser::parse_content;
use interop_course_store::{load_config_from, CourseConfig, JsonFileStore};

use crate::presentation::ConsolePresentation;

/// Global command-line options.
pub struct Settings {
    pub config: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
}

impl Settings {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> Result<CourseConfig> {
        let mut config = load_config_from(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        Ok(config)
    }
}

/// The configured course content, or the built-in course.
pub fn load_content(config: &CourseConfig) -> Result<CourseContent> {
    match &config.content {
        Some(path) => parse_content(path),
        None => CourseContent::builtin().context("built-in course content is invalid"),
    }
}

pub struct Session {
    pub config: CourseConfig,
    pub course: Course<ConsolePresentation>,
}

impl Session {
    /// Build the course and restore saved progress.
    pub fn open(settings: &Settings) -> Result<Self> {
        let config = settings.load_config()?;
        let content = load_content(&config)?;
        let store = JsonFileStore::new(config.snapshot_path());

        let mut course = Course::new(content, Box::new(store), ConsolePresentation::default());
        let outcome = course.load();
        tracing::debug!(?outcome, path = %config.snapshot_path().display(), "session opened");

        let selections = ConsolePresentation::selections_from(course.state());
        course.presentation_mut().restore_selections(selections);

        Ok(Self { config, course })
    }

    /// Record the time spent in this session and save.
    pub fn finish(mut self) {
        self.course.tick();
        self.course.save();
    }
}
