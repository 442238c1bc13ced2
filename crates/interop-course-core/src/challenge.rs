//! Solution builder for the master challenge: component selection, scoring
//! and the qualitative cost/complexity analysis.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ComponentId;

/// Points at or above which the master module's completion action is offered.
pub const FINAL_COMPLETION_THRESHOLD: u32 = 30;

/// Outcome category of an evaluated solution. The first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionVerdict {
    /// Nothing selected.
    Empty,
    /// FHIR and RxNorm together.
    Optimal,
    DrugTerminologyOnly,
    ModernIntegrationOnly,
    Partial,
}

impl SolutionVerdict {
    pub fn points(self) -> u32 {
        match self {
            SolutionVerdict::Empty => 0,
            SolutionVerdict::Optimal => 50,
            SolutionVerdict::DrugTerminologyOnly => 30,
            SolutionVerdict::ModernIntegrationOnly => 25,
            SolutionVerdict::Partial => 15,
        }
    }

    pub fn feedback(self) -> &'static str {
        match self {
            SolutionVerdict::Empty => {
                "You must select at least one standard to create a viable solution."
            }
            SolutionVerdict::Optimal => {
                "Excellent! You've selected the optimal combination of FHIR for modern \
                 integration and RxNorm for drug standardization."
            }
            SolutionVerdict::DrugTerminologyOnly => {
                "Good choice with RxNorm for drug terminology. Consider adding FHIR for \
                 better integration."
            }
            SolutionVerdict::ModernIntegrationOnly => {
                "FHIR is a great choice for modern integration. Consider adding RxNorm for \
                 drug standardization."
            }
            SolutionVerdict::Partial => {
                "Your solution has merit but could be improved with modern standards like \
                 FHIR and RxNorm."
            }
        }
    }
}

/// Structured result of [`SolutionChallenge::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionEvaluation {
    /// Quality score in `0..=100`.
    pub score: u32,
    pub verdict: SolutionVerdict,
    pub points_awarded: u32,
}

impl SolutionEvaluation {
    /// Whether the result is good enough to finish the master module.
    pub fn unlocks_final_completion(&self) -> bool {
        self.points_awarded >= FINAL_COMPLETION_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    fn from_total(total: u32) -> Self {
        match total {
            t if t >= 8 => Level::High,
            t if t >= 5 => Level::Medium,
            _ => Level::Low,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => write!(f, "Low"),
            Level::Medium => write!(f, "Medium"),
            Level::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Benefit {
    ModernIntegration,
    DrugTerminology,
    ProvenPatterns,
}

impl fmt::Display for Benefit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Benefit::ModernIntegration => "Modern web-friendly integration",
            Benefit::DrugTerminology => "Standardized drug terminology",
            Benefit::ProvenPatterns => "Proven implementation patterns",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Risk {
    ComplexTerminologyWithoutDrugs,
    MixedMessaging,
    NothingSelected,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Risk::ComplexTerminologyWithoutDrugs => {
                "Complex terminology without drug standardization"
            }
            Risk::MixedMessaging => "Mixed messaging standards may cause confusion",
            Risk::NothingSelected => "No standards selected - solution will not work",
        })
    }
}

/// Qualitative profile of the current selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionAnalysis {
    pub cost: Level,
    pub complexity: Level,
    pub benefits: Vec<Benefit>,
    pub risks: Vec<Risk>,
}

impl SolutionAnalysis {
    pub fn benefits_text(&self) -> String {
        join_or(&self.benefits, "Limited benefits with current selection")
    }

    pub fn risks_text(&self) -> String {
        join_or(&self.risks, "Minimal risks with current selection")
    }
}

fn join_or<T: fmt::Display>(items: &[T], fallback: &str) -> String {
    if items.is_empty() {
        return fallback.to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The learner's component selection.
///
/// Membership is set-like; the order of insertion is kept for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionChallenge {
    selected: Vec<ComponentId>,
}

impl SolutionChallenge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the component, or remove it if already selected. Returns whether
    /// it is selected afterwards.
    pub fn toggle(&mut self, component: ComponentId) -> bool {
        if let Some(pos) = self.selected.iter().position(|c| *c == component) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(component);
            true
        }
    }

    pub fn selected(&self) -> &[ComponentId] {
        &self.selected
    }

    pub fn contains(&self, component: ComponentId) -> bool {
        self.selected.contains(&component)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Quality score of the selection, clamped to `0..=100`.
    pub fn score(&self) -> u32 {
        let has = |c| self.contains(c);
        let mut score = (10 * self.selected.len() as i64).min(40);

        if has(ComponentId::Hl7Fhir) && has(ComponentId::Rxnorm) {
            score += 30;
        }
        if has(ComponentId::IheProfiles) {
            score += 10;
        }
        if has(ComponentId::Loinc) {
            score += 10;
        }
        if has(ComponentId::Hl7V2) && has(ComponentId::Hl7Fhir) {
            score -= 10;
        }
        if has(ComponentId::SnomedCt) && !has(ComponentId::Rxnorm) {
            score -= 5;
        }

        score.clamp(0, 100) as u32
    }

    pub fn verdict(&self) -> SolutionVerdict {
        let fhir = self.contains(ComponentId::Hl7Fhir);
        let rxnorm = self.contains(ComponentId::Rxnorm);
        match (self.selected.is_empty(), fhir, rxnorm) {
            (true, _, _) => SolutionVerdict::Empty,
            (false, true, true) => SolutionVerdict::Optimal,
            (false, false, true) => SolutionVerdict::DrugTerminologyOnly,
            (false, true, false) => SolutionVerdict::ModernIntegrationOnly,
            (false, false, false) => SolutionVerdict::Partial,
        }
    }

    /// Score and classify the selection. Does not touch learner state.
    pub fn evaluate(&self) -> SolutionEvaluation {
        let verdict = self.verdict();
        SolutionEvaluation {
            score: self.score(),
            verdict,
            points_awarded: verdict.points(),
        }
    }

    pub fn analyze(&self) -> SolutionAnalysis {
        let cost: u32 = self.selected.iter().map(|c| c.cost_weight()).sum();
        let complexity: u32 = self.selected.iter().map(|c| c.complexity_weight()).sum();

        let mut benefits = Vec::new();
        if self.contains(ComponentId::Hl7Fhir) {
            benefits.push(Benefit::ModernIntegration);
        }
        if self.contains(ComponentId::Rxnorm) {
            benefits.push(Benefit::DrugTerminology);
        }
        if self.contains(ComponentId::IheProfiles) {
            benefits.push(Benefit::ProvenPatterns);
        }

        let mut risks = Vec::new();
        if self.contains(ComponentId::SnomedCt) && !self.contains(ComponentId::Rxnorm) {
            risks.push(Risk::ComplexTerminologyWithoutDrugs);
        }
        if self.contains(ComponentId::Hl7V2) && self.contains(ComponentId::Hl7Fhir) {
            risks.push(Risk::MixedMessaging);
        }
        if self.selected.is_empty() {
            risks.push(Risk::NothingSelected);
        }

        SolutionAnalysis {
            cost: Level::from_total(cost),
            complexity: Level::from_total(complexity),
            benefits,
            risks,
        }
    }
}

impl FromIterator<ComponentId> for SolutionChallenge {
    fn from_iter<I: IntoIterator<Item = ComponentId>>(iter: I) -> Self {
        let mut challenge = SolutionChallenge::new();
        for component in iter {
            if !challenge.contains(component) {
                challenge.selected.push(component);
            }
        }
        challenge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComponentId::*;

    fn pick(components: &[ComponentId]) -> SolutionChallenge {
        components.iter().copied().collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut challenge = SolutionChallenge::new();
        assert!(challenge.toggle(Loinc));
        assert!(challenge.toggle(Rxnorm));
        assert_eq!(challenge.selected(), [Loinc, Rxnorm]);
        assert!(!challenge.toggle(Loinc));
        assert_eq!(challenge.selected(), [Rxnorm]);
    }

    #[test]
    fn fhir_and_rxnorm_is_optimal() {
        let result = pick(&[Hl7Fhir, Rxnorm]).evaluate();
        assert_eq!(result.score, 50);
        assert_eq!(result.verdict, SolutionVerdict::Optimal);
        assert_eq!(result.points_awarded, 50);
        assert!(result.unlocks_final_completion());
        assert!(result.verdict.feedback().contains("optimal combination"));
    }

    #[test]
    fn empty_selection_scores_nothing() {
        let result = SolutionChallenge::new().evaluate();
        assert_eq!(result.score, 0);
        assert_eq!(result.points_awarded, 0);
        assert_eq!(result.verdict, SolutionVerdict::Empty);
        assert!(!result.unlocks_final_completion());
    }

    #[test]
    fn base_score_caps_at_forty() {
        // 40 base + 30 combo + 10 IHE + 10 LOINC - 10 mixed messaging
        assert_eq!(pick(&ComponentId::ALL).score(), 80);
    }

    #[test]
    fn penalties_apply() {
        assert_eq!(pick(&[SnomedCt]).score(), 5);
        assert_eq!(pick(&[Hl7V2, Hl7Fhir]).score(), 10);
        assert_eq!(pick(&[SnomedCt, Rxnorm]).score(), 20);
    }

    #[test]
    fn verdict_cascade() {
        assert_eq!(pick(&[Rxnorm, Loinc]).evaluate().points_awarded, 30);
        assert_eq!(pick(&[Hl7Fhir]).evaluate().points_awarded, 25);
        let partial = pick(&[Hl7V2, Loinc]).evaluate();
        assert_eq!(partial.verdict, SolutionVerdict::Partial);
        assert_eq!(partial.points_awarded, 15);
        assert!(!partial.unlocks_final_completion());
    }

    #[test]
    fn analysis_levels_and_texts() {
        let analysis = pick(&[Hl7Fhir, Rxnorm, SnomedCt]).analyze();
        assert_eq!(analysis.cost, Level::Medium);
        assert_eq!(analysis.complexity, Level::Medium);
        assert_eq!(pick(&[SnomedCt, Loinc, Rxnorm, Hl7V2]).analyze().cost, Level::High);
        assert_eq!(
            analysis.benefits_text(),
            "Modern web-friendly integration, Standardized drug terminology"
        );
        assert_eq!(analysis.risks_text(), "Minimal risks with current selection");

        let empty = SolutionChallenge::new().analyze();
        assert_eq!(empty.cost, Level::Low);
        assert_eq!(empty.benefits_text(), "Limited benefits with current selection");
        assert_eq!(empty.risks, vec![Risk::NothingSelected]);
    }

    #[test]
    fn analysis_flags_conflicts() {
        let analysis = pick(&[SnomedCt, Hl7V2, Hl7Fhir]).analyze();
        assert_eq!(
            analysis.risks,
            vec![Risk::ComplexTerminologyWithoutDrugs, Risk::MixedMessaging]
        );
        assert_eq!(analysis.complexity, Level::High);
    }
}
