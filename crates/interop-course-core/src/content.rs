//! Static course content: answer key, feedback table, scenario pathways and
//! the achievement catalog.
//!
//! Content is loaded once at startup and never mutated afterwards. The
//! built-in course ships as `content/course.toml` and is embedded in the
//! binary; a custom file with the same layout can be loaded instead.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CourseError;
use crate::model::{ModuleId, PathwayKey, QuestionId, ScenarioId};

/// The embedded course definition.
pub const BUILTIN_CONTENT: &str = include_str!("../content/course.toml");

/// A single quiz question: its correct token and both feedback texts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text shown to the learner (optional in content files).
    #[serde(default)]
    pub prompt: String,
    /// The correct answer token. Compared case-sensitively.
    pub answer: String,
    pub correct_feedback: String,
    pub incorrect_feedback: String,
}

impl QuizQuestion {
    pub fn feedback(&self, correct: bool) -> &str {
        if correct {
            &self.correct_feedback
        } else {
            &self.incorrect_feedback
        }
    }
}

/// The quiz attached to one module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: BTreeMap<QuestionId, QuizQuestion>,
}

/// The kind of an outcome metric attached to a pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Time,
    Cost,
    Risk,
    DuplicateTests,
    Accuracy,
    Errors,
}

impl MetricKind {
    /// Display label for the metric.
    pub fn label(self) -> &'static str {
        match self {
            MetricKind::Time => "Time to Resolution",
            MetricKind::Cost => "Cost Impact",
            MetricKind::Risk => "Patient Risk",
            MetricKind::DuplicateTests => "Duplicate Tests",
            MetricKind::Accuracy => "Accuracy Rate",
            MetricKind::Errors => "Potential Errors",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fixed outcome metrics for a pathway. Scenarios use different subsets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_tests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<u32>,
}

impl PathwayMetrics {
    /// The metrics that are present, in display order.
    pub fn entries(&self) -> Vec<(MetricKind, String)> {
        let mut entries = Vec::new();
        if let Some(v) = &self.time {
            entries.push((MetricKind::Time, v.clone()));
        }
        if let Some(v) = &self.cost {
            entries.push((MetricKind::Cost, v.clone()));
        }
        if let Some(v) = &self.risk {
            entries.push((MetricKind::Risk, v.clone()));
        }
        if let Some(v) = self.duplicate_tests {
            entries.push((MetricKind::DuplicateTests, v.to_string()));
        }
        if let Some(v) = &self.accuracy {
            entries.push((MetricKind::Accuracy, v.clone()));
        }
        if let Some(v) = self.errors {
            entries.push((MetricKind::Errors, v.to_string()));
        }
        entries
    }
}

/// One response strategy within a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pathway {
    pub title: String,
    pub description: String,
    pub analysis: String,
    pub points: u32,
    pub metrics: PathwayMetrics,
}

/// A branching clinical scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub title: String,
    pub description: String,
    pub pathways: BTreeMap<PathwayKey, Pathway>,
}

/// An entry of the achievement catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub icon: String,
    pub description: String,
    /// Display-only; grants never apply it.
    pub points: u32,
}

/// All static content the engines read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseContent {
    pub title: String,
    pub quizzes: BTreeMap<ModuleId, Quiz>,
    pub scenarios: BTreeMap<ScenarioId, Scenario>,
    pub achievements: Vec<Achievement>,
}

impl CourseContent {
    /// Parse the embedded course definition.
    pub fn builtin() -> anyhow::Result<Self> {
        crate::parser::parse_content_str(BUILTIN_CONTENT, std::path::Path::new("course.toml"))
    }

    pub fn quiz(&self, module: ModuleId) -> Result<&Quiz, CourseError> {
        self.quizzes
            .get(&module)
            .ok_or(CourseError::MissingQuiz(module))
    }

    pub fn question(
        &self,
        module: ModuleId,
        question: QuestionId,
    ) -> Result<&QuizQuestion, CourseError> {
        self.quiz(module)?
            .questions
            .get(&question)
            .ok_or(CourseError::UnknownQuestion { module, question })
    }

    /// Number of questions defined for a module (0 if it has no quiz).
    pub fn question_count(&self, module: ModuleId) -> usize {
        self.quizzes
            .get(&module)
            .map(|q| q.questions.len())
            .unwrap_or(0)
    }

    pub fn scenario(&self, scenario: ScenarioId) -> Result<&Scenario, CourseError> {
        self.scenarios
            .get(&scenario)
            .ok_or(CourseError::UnknownScenario(scenario))
    }

    pub fn pathway(&self, scenario: ScenarioId, pathway: PathwayKey) -> Result<&Pathway, CourseError> {
        self.scenario(scenario)?
            .pathways
            .get(&pathway)
            .ok_or(CourseError::UnknownPathway { scenario, pathway })
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }
}
