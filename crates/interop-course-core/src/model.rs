//! Core data model types for the course engine.
//!
//! Every identifier the engine dispatches on is a closed enumeration, so a
//! module, question, scenario, pathway or component that the course does not
//! define cannot reach the engines at all. Free-form strings only appear at
//! the parsing boundary (`FromStr`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of sequential learning modules.
pub const MODULE_COUNT: usize = 5;

/// Points awarded for each correct quiz answer.
pub const CORRECT_ANSWER_POINTS: u32 = 10;

// ---------------------------------------------------------------------------
// Modules
// ---------------------------------------------------------------------------

/// One of the five sequential learning modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    Foundation,
    Standards,
    Interoperability,
    Scenarios,
    Master,
}

impl ModuleId {
    /// All modules in course order.
    pub const ALL: [ModuleId; MODULE_COUNT] = [
        ModuleId::Foundation,
        ModuleId::Standards,
        ModuleId::Interoperability,
        ModuleId::Scenarios,
        ModuleId::Master,
    ];

    /// Position of this module in the course (0-based).
    pub fn index(self) -> usize {
        match self {
            ModuleId::Foundation => 0,
            ModuleId::Standards => 1,
            ModuleId::Interoperability => 2,
            ModuleId::Scenarios => 3,
            ModuleId::Master => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<ModuleId> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ModuleId::Foundation => "foundation",
            ModuleId::Standards => "standards",
            ModuleId::Interoperability => "interoperability",
            ModuleId::Scenarios => "scenarios",
            ModuleId::Master => "master",
        }
    }

    /// Display title of the module.
    pub fn title(self) -> &'static str {
        match self {
            ModuleId::Foundation => "Foundation",
            ModuleId::Standards => "Standards Deep Dive",
            ModuleId::Interoperability => "Interoperability Levels",
            ModuleId::Scenarios => "Clinical Scenarios",
            ModuleId::Master => "Master Challenge",
        }
    }

    /// Point bonus applied when the module is completed.
    pub fn completion_bonus(self) -> u32 {
        match self {
            ModuleId::Foundation => 100,
            ModuleId::Standards => 150,
            ModuleId::Interoperability => 200,
            ModuleId::Scenarios => 250,
            ModuleId::Master => 300,
        }
    }

    /// Achievement granted when the module is completed.
    pub fn completion_achievement(self) -> &'static str {
        match self {
            ModuleId::Foundation => crate::achievements::STANDARDS_SCHOLAR,
            ModuleId::Standards => crate::achievements::FHIR_MASTER,
            ModuleId::Interoperability => crate::achievements::INTEROPERABILITY_EXPERT,
            ModuleId::Scenarios => crate::achievements::CLINICAL_CONNECTOR,
            ModuleId::Master => crate::achievements::INTEGRATION_SPECIALIST,
        }
    }

    /// The module that must be completed before this one, if any.
    pub fn prerequisite(self) -> Option<ModuleId> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// The module unlocked by completing this one, if any.
    pub fn next(self) -> Option<ModuleId> {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let name = normalized.strip_suffix("-content").unwrap_or(&normalized);
        if let Ok(index) = name.parse::<usize>() {
            return ModuleId::from_index(index).ok_or_else(|| format!("unknown module: {s}"));
        }
        ModuleId::ALL
            .into_iter()
            .find(|m| m.as_str() == name)
            .ok_or_else(|| format!("unknown module: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A quiz question slot within a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionId {
    #[serde(alias = "Question 1")]
    Q1,
    #[serde(alias = "Question 2")]
    Q2,
    #[serde(alias = "Question 3")]
    Q3,
}

impl QuestionId {
    pub const ALL: [QuestionId; 3] = [QuestionId::Q1, QuestionId::Q2, QuestionId::Q3];

    pub fn number(self) -> u8 {
        match self {
            QuestionId::Q1 => 1,
            QuestionId::Q2 => 2,
            QuestionId::Q3 => 3,
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {}", self.number())
    }
}

impl FromStr for QuestionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let digits = normalized
            .strip_prefix("question")
            .or_else(|| normalized.strip_prefix('q'))
            .unwrap_or(&normalized)
            .trim();
        match digits {
            "1" => Ok(QuestionId::Q1),
            "2" => Ok(QuestionId::Q2),
            "3" => Ok(QuestionId::Q3),
            _ => Err(format!("unknown question: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Scenarios, pathways, components
// ---------------------------------------------------------------------------

/// A branching clinical scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioId {
    DiabeticEd,
    MedicationReconciliation,
}

impl ScenarioId {
    pub const ALL: [ScenarioId; 2] = [ScenarioId::DiabeticEd, ScenarioId::MedicationReconciliation];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioId::DiabeticEd => "diabetic-ed",
            ScenarioId::MedicationReconciliation => "medication-reconciliation",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ScenarioId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| format!("unknown scenario: {s}"))
    }
}

/// A predefined response strategy inside a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathwayKey {
    WithoutStandards,
    StandardsNoInterop,
    FullInterop,
    Manual,
    SemiAutomated,
    FullyAutomated,
}

impl PathwayKey {
    pub const ALL: [PathwayKey; 6] = [
        PathwayKey::WithoutStandards,
        PathwayKey::StandardsNoInterop,
        PathwayKey::FullInterop,
        PathwayKey::Manual,
        PathwayKey::SemiAutomated,
        PathwayKey::FullyAutomated,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PathwayKey::WithoutStandards => "without-standards",
            PathwayKey::StandardsNoInterop => "standards-no-interop",
            PathwayKey::FullInterop => "full-interop",
            PathwayKey::Manual => "manual",
            PathwayKey::SemiAutomated => "semi-automated",
            PathwayKey::FullyAutomated => "fully-automated",
        }
    }
}

impl fmt::Display for PathwayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathwayKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        PathwayKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| format!("unknown pathway: {s}"))
    }
}

/// A standard the learner can pick in the solution builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentId {
    Hl7Fhir,
    Hl7V2,
    Rxnorm,
    Loinc,
    SnomedCt,
    IheProfiles,
}

impl ComponentId {
    pub const ALL: [ComponentId; 6] = [
        ComponentId::Hl7Fhir,
        ComponentId::Hl7V2,
        ComponentId::Rxnorm,
        ComponentId::Loinc,
        ComponentId::SnomedCt,
        ComponentId::IheProfiles,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ComponentId::Hl7Fhir => "hl7-fhir",
            ComponentId::Hl7V2 => "hl7-v2",
            ComponentId::Rxnorm => "rxnorm",
            ComponentId::Loinc => "loinc",
            ComponentId::SnomedCt => "snomed-ct",
            ComponentId::IheProfiles => "ihe-profiles",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComponentId::Hl7Fhir => "HL7 FHIR",
            ComponentId::Hl7V2 => "HL7 v2",
            ComponentId::Rxnorm => "RxNorm",
            ComponentId::Loinc => "LOINC",
            ComponentId::SnomedCt => "SNOMED-CT",
            ComponentId::IheProfiles => "IHE Profiles",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ComponentId::Hl7Fhir => "Modern web-friendly standard for medication resources",
            ComponentId::Hl7V2 => "Traditional messaging standard for medication data",
            ComponentId::Rxnorm => "Standardized drug terminology for medication reconciliation",
            ComponentId::Loinc => "Laboratory and clinical observation codes",
            ComponentId::SnomedCt => "Comprehensive clinical terminology",
            ComponentId::IheProfiles => "Implementation guides for interoperability",
        }
    }

    /// Relative implementation cost (1 = low, 3 = high).
    pub fn cost_weight(self) -> u32 {
        match self {
            ComponentId::Hl7V2 | ComponentId::IheProfiles => 1,
            ComponentId::Hl7Fhir | ComponentId::Rxnorm | ComponentId::Loinc => 2,
            ComponentId::SnomedCt => 3,
        }
    }

    /// Relative implementation complexity (1 = low, 3 = high).
    pub fn complexity_weight(self) -> u32 {
        match self {
            ComponentId::IheProfiles => 1,
            ComponentId::Hl7Fhir | ComponentId::Rxnorm | ComponentId::Loinc => 2,
            ComponentId::Hl7V2 | ComponentId::SnomedCt => 3,
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ComponentId::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown component: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Learner state
// ---------------------------------------------------------------------------

/// One recorded quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub question: QuestionId,
    pub answer: String,
    pub correct: bool,
}

/// Whether a module can be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Locked,
    Unlocked,
    Completed,
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleStatus::Locked => write!(f, "locked"),
            ModuleStatus::Unlocked => write!(f, "unlocked"),
            ModuleStatus::Completed => write!(f, "completed"),
        }
    }
}

/// The learner's mutable progress.
///
/// Fields are only mutated inside this crate, through the engines, so the
/// gating, no-duplicate-achievement and monotonic-points invariants hold for
/// every value a caller can observe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerState {
    pub(crate) module_completion: [bool; MODULE_COUNT],
    pub(crate) total_points: u32,
    pub(crate) achievements: Vec<String>,
    pub(crate) scenarios_completed: Vec<ScenarioId>,
    pub(crate) quiz_answers: BTreeMap<ModuleId, Vec<AttemptRecord>>,
    pub(crate) time_spent: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_saved: Option<DateTime<Utc>>,
}

impl LearnerState {
    pub fn module_completion(&self) -> [bool; MODULE_COUNT] {
        self.module_completion
    }

    pub fn is_complete(&self, module: ModuleId) -> bool {
        self.module_completion[module.index()]
    }

    /// Locked / unlocked / completed, derived from the sequential gating rule.
    pub fn module_status(&self, module: ModuleId) -> ModuleStatus {
        if self.is_complete(module) {
            ModuleStatus::Completed
        } else if module.prerequisite().map_or(true, |p| self.is_complete(p)) {
            ModuleStatus::Unlocked
        } else {
            ModuleStatus::Locked
        }
    }

    pub fn completed_count(&self) -> usize {
        self.module_completion.iter().filter(|done| **done).count()
    }

    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    pub fn scenarios_completed(&self) -> &[ScenarioId] {
        &self.scenarios_completed
    }

    pub fn quiz_answers(&self) -> &BTreeMap<ModuleId, Vec<AttemptRecord>> {
        &self.quiz_answers
    }

    pub fn answers_for(&self, module: ModuleId) -> &[AttemptRecord] {
        self.quiz_answers
            .get(&module)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn time_spent(&self) -> u64 {
        self.time_spent
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    pub(crate) fn add_points(&mut self, points: u32) {
        self.total_points = self.total_points.saturating_add(points);
    }
}
