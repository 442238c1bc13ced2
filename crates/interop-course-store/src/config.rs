//! Course configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "interop-course.toml";

/// Environment variable that overrides `data_dir`.
pub const DATA_DIR_ENV: &str = "INTEROP_COURSE_DATA_DIR";

/// Top-level course configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseConfig {
    /// Directory holding the progress snapshot.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Snapshot file name inside `data_dir`.
    #[serde(default = "default_snapshot_file")]
    pub snapshot_file: String,
    /// Custom course content file. The built-in course is used when unset.
    #[serde(default)]
    pub content: Option<PathBuf>,
    #[serde(default)]
    pub learner_name: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./interop-course-data")
}
fn default_snapshot_file() -> String {
    "progress.json".to_string()
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            snapshot_file: default_snapshot_file(),
            content: None,
            learner_name: None,
        }
    }
}

impl CourseConfig {
    /// Full path of the progress snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(&self.snapshot_file)
    }

    fn resolve_env(&mut self) {
        self.data_dir = PathBuf::from(resolve_env_vars(&self.data_dir.to_string_lossy()));
        self.snapshot_file = resolve_env_vars(&self.snapshot_file);
        self.content = self
            .content
            .as_ref()
            .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
        self.learner_name = self.learner_name.as_ref().map(|n| resolve_env_vars(n));
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables resolve to the empty string. Substituted values are
/// inserted as-is and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `interop-course.toml` in the current directory
/// 2. `~/.config/interop-course/config.toml`
///
/// `INTEROP_COURSE_DATA_DIR` overrides `data_dir` in either case.
pub fn load_config() -> Result<CourseConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<CourseConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<CourseConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => CourseConfig::default(),
    };

    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            config.data_dir = PathBuf::from(dir);
        }
    }

    config.resolve_env();
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("interop-course"))
}
