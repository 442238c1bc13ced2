//! Engine error types.
//!
//! Persistence failures never show up here: the progress store recovers from
//! them locally. What remains are transitions the course rules forbid and
//! identifiers the loaded content does not define.

use thiserror::Error;

use crate::model::{ModuleId, PathwayKey, QuestionId, ScenarioId};

/// Errors returned by the course engines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    /// A module was completed before the module that gates it.
    #[error("module '{module}' cannot be completed before '{prerequisite}'")]
    OutOfSequence {
        module: ModuleId,
        prerequisite: ModuleId,
    },

    /// The loaded content has no quiz for the module.
    #[error("no quiz defined for module '{0}'")]
    MissingQuiz(ModuleId),

    /// The module's quiz does not define the question.
    #[error("{question} is not defined for module '{module}'")]
    UnknownQuestion {
        module: ModuleId,
        question: QuestionId,
    },

    /// The loaded content does not define the scenario.
    #[error("scenario not found: {0}")]
    UnknownScenario(ScenarioId),

    /// The pathway is not one of the scenario's choices.
    #[error("pathway '{pathway}' is not part of scenario '{scenario}'")]
    UnknownPathway {
        scenario: ScenarioId,
        pathway: PathwayKey,
    },
}

impl CourseError {
    /// Returns `true` if the error points at a gap in the course content
    /// rather than at a forbidden learner transition.
    pub fn is_content_mismatch(&self) -> bool {
        !matches!(self, CourseError::OutOfSequence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_identifiers() {
        let err = CourseError::OutOfSequence {
            module: ModuleId::Standards,
            prerequisite: ModuleId::Foundation,
        };
        assert_eq!(
            err.to_string(),
            "module 'standards' cannot be completed before 'foundation'"
        );

        let err = CourseError::UnknownQuestion {
            module: ModuleId::Master,
            question: QuestionId::Q3,
        };
        assert_eq!(err.to_string(), "Question 3 is not defined for module 'master'");
    }

    #[test]
    fn classifies_content_mismatches() {
        assert!(CourseError::MissingQuiz(ModuleId::Foundation).is_content_mismatch());
        assert!(CourseError::UnknownPathway {
            scenario: ScenarioId::DiabeticEd,
            pathway: PathwayKey::Manual,
        }
        .is_content_mismatch());
        assert!(!CourseError::OutOfSequence {
            module: ModuleId::Master,
            prerequisite: ModuleId::Scenarios,
        }
        .is_content_mismatch());
    }
}
