//! TOML course content parser.
//!
//! Loads course content from TOML files and validates it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::content::{Achievement, CourseContent, Pathway, PathwayMetrics, Quiz, QuizQuestion, Scenario};
use crate::model::{ModuleId, PathwayKey, QuestionId, ScenarioId};

/// Points awarded for a pathway whose content does not set any.
pub const DEFAULT_PATHWAY_POINTS: u32 = 5;

const DEFAULT_ANALYSIS: &str = "Analysis not available.";

/// Intermediate TOML structure for parsing course content files.
#[derive(Debug, Deserialize)]
struct TomlCourseFile {
    course: TomlCourseHeader,
    #[serde(default)]
    quizzes: BTreeMap<ModuleId, BTreeMap<QuestionId, TomlQuestion>>,
    #[serde(default)]
    scenarios: BTreeMap<ScenarioId, TomlScenario>,
    #[serde(default)]
    achievements: Vec<TomlAchievement>,
}

#[derive(Debug, Deserialize)]
struct TomlCourseHeader {
    title: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    #[serde(default)]
    prompt: String,
    answer: String,
    correct_feedback: String,
    incorrect_feedback: String,
}

#[derive(Debug, Deserialize)]
struct TomlScenario {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    pathways: BTreeMap<PathwayKey, TomlPathway>,
}

#[derive(Debug, Deserialize)]
struct TomlPathway {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    analysis: Option<String>,
    #[serde(default)]
    points: Option<u32>,
    #[serde(default)]
    metrics: PathwayMetrics,
}

#[derive(Debug, Deserialize)]
struct TomlAchievement {
    id: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    points: u32,
}

/// Parse a single TOML file into `CourseContent`.
pub fn parse_content(path: &Path) -> Result<CourseContent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read course content file: {}", path.display()))?;

    parse_content_str(&content, path)
}

/// Parse a TOML string into `CourseContent` (useful for testing).
pub fn parse_content_str(content: &str, source_path: &Path) -> Result<CourseContent> {
    let parsed: TomlCourseFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|(module, questions)| {
            let questions = questions
                .into_iter()
                .map(|(id, q)| {
                    (
                        id,
                        QuizQuestion {
                            prompt: q.prompt,
                            answer: q.answer,
                            correct_feedback: q.correct_feedback,
                            incorrect_feedback: q.incorrect_feedback,
                        },
                    )
                })
                .collect();
            (module, Quiz { questions })
        })
        .collect();

    let scenarios = parsed
        .scenarios
        .into_iter()
        .map(|(id, s)| {
            let pathways = s
                .pathways
                .into_iter()
                .map(|(key, p)| {
                    (
                        key,
                        Pathway {
                            title: p.title,
                            description: p.description,
                            analysis: p.analysis.unwrap_or_else(|| DEFAULT_ANALYSIS.to_string()),
                            points: p.points.unwrap_or(DEFAULT_PATHWAY_POINTS),
                            metrics: p.metrics,
                        },
                    )
                })
                .collect();
            (
                id,
                Scenario {
                    title: s.title,
                    description: s.description,
                    pathways,
                },
            )
        })
        .collect();

    let achievements = parsed
        .achievements
        .into_iter()
        .map(|a| Achievement {
            id: a.id,
            icon: a.icon,
            description: a.description,
            points: a.points,
        })
        .collect();

    Ok(CourseContent {
        title: parsed.course.title,
        quizzes,
        scenarios,
        achievements,
    })
}

/// A warning from content validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// What the warning is about (e.g. "foundation/Question 2").
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn about(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.into()),
            message: message.into(),
        }
    }
}

/// Validate course content for common issues.
pub fn validate_content(content: &CourseContent) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Every module needs a non-empty quiz, otherwise it can never become ready
    for module in ModuleId::ALL {
        match content.quizzes.get(&module) {
            None => warnings.push(ValidationWarning::about(
                module.as_str(),
                "no quiz defined; the module can never become ready",
            )),
            Some(quiz) if quiz.questions.is_empty() => warnings.push(ValidationWarning::about(
                module.as_str(),
                "quiz has no questions",
            )),
            Some(quiz) => {
                for (id, question) in &quiz.questions {
                    if question.answer.trim().is_empty() {
                        warnings.push(ValidationWarning::about(
                            format!("{module}/{id}"),
                            "answer token is empty",
                        ));
                    }
                }
            }
        }
    }

    for scenario in ScenarioId::ALL {
        if !content.scenarios.contains_key(&scenario) {
            warnings.push(ValidationWarning::about(scenario.as_str(), "scenario not defined"));
        }
    }

    // Scenarios without choices, and pathways shared between scenarios
    let mut pathway_owner: HashMap<PathwayKey, ScenarioId> = HashMap::new();
    for (id, scenario) in &content.scenarios {
        if scenario.pathways.is_empty() {
            warnings.push(ValidationWarning::about(id.as_str(), "scenario has no pathways"));
        }
        for key in scenario.pathways.keys() {
            if let Some(owner) = pathway_owner.insert(*key, *id) {
                warnings.push(ValidationWarning::about(
                    format!("{id}/{key}"),
                    format!("pathway is also defined in scenario '{owner}'"),
                ));
            }
        }
    }

    // Duplicate achievement IDs
    let mut seen_ids = HashSet::new();
    for achievement in &content.achievements {
        if !seen_ids.insert(achievement.id.as_str()) {
            warnings.push(ValidationWarning::about(
                achievement.id.clone(),
                format!("duplicate achievement ID: {}", achievement.id),
            ));
        }
    }

    // Completion achievements should be in the catalog so they render with metadata
    for module in ModuleId::ALL {
        let id = module.completion_achievement();
        if content.achievement(id).is_none() {
            warnings.push(ValidationWarning::about(
                module.as_str(),
                format!("completion achievement '{id}' is not in the catalog"),
            ));
        }
    }

    warnings
}
