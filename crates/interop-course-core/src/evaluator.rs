//! Answer evaluator: grades quiz answers against the answer key.

use serde::{Deserialize, Serialize};

use crate::content::CourseContent;
use crate::error::CourseError;
use crate::model::{AttemptRecord, LearnerState, ModuleId, QuestionId, CORRECT_ANSWER_POINTS};

/// The graded result of one answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub module: ModuleId,
    pub question: QuestionId,
    pub correct: bool,
    pub feedback: String,
    pub points_awarded: u32,
}

/// Grade `answer` without recording anything.
///
/// Correctness depends only on the arguments and the answer key.
pub fn grade(
    content: &CourseContent,
    module: ModuleId,
    question: QuestionId,
    answer: &str,
) -> Result<bool, CourseError> {
    Ok(content.question(module, question)?.answer == answer)
}

/// Grades answers and appends them to the learner's history.
pub struct AnswerEvaluator<'a> {
    state: &'a mut LearnerState,
    content: &'a CourseContent,
}

impl<'a> AnswerEvaluator<'a> {
    pub fn new(state: &'a mut LearnerState, content: &'a CourseContent) -> Self {
        Self { state, content }
    }

    /// Grade the answer, record the attempt and award points when correct.
    pub fn evaluate(
        &mut self,
        module: ModuleId,
        question: QuestionId,
        answer: &str,
    ) -> Result<Evaluation, CourseError> {
        let entry = self.content.question(module, question)?;
        let correct = entry.answer == answer;
        let points_awarded = if correct { CORRECT_ANSWER_POINTS } else { 0 };

        self.state.add_points(points_awarded);
        self.state
            .quiz_answers
            .entry(module)
            .or_default()
            .push(AttemptRecord {
                question,
                answer: answer.to_string(),
                correct,
            });

        tracing::debug!(%module, %question, correct, "answer recorded");

        Ok(Evaluation {
            module,
            question,
            correct,
            feedback: entry.feedback(correct).to_string(),
            points_awarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> CourseContent {
        CourseContent::builtin().unwrap()
    }

    #[test]
    fn correct_answer_awards_ten_points() {
        let content = content();
        let mut state = LearnerState::default();
        let result = AnswerEvaluator::new(&mut state, &content)
            .evaluate(ModuleId::Foundation, QuestionId::Q1, "semantic")
            .unwrap();

        assert!(result.correct);
        assert_eq!(result.points_awarded, 10);
        assert!(result.feedback.starts_with("Semantic interoperability is missing"));
        assert_eq!(state.total_points(), 10);
        assert_eq!(
            state.answers_for(ModuleId::Foundation),
            [AttemptRecord {
                question: QuestionId::Q1,
                answer: "semantic".into(),
                correct: true,
            }]
        );
    }

    #[test]
    fn incorrect_answer_is_recorded_without_points() {
        let content = content();
        let mut state = LearnerState::default();
        let result = AnswerEvaluator::new(&mut state, &content)
            .evaluate(ModuleId::Standards, QuestionId::Q1, "dicom")
            .unwrap();

        assert!(!result.correct);
        assert!(result.feedback.starts_with("The correct answer is HL7 v2."));
        assert_eq!(state.total_points(), 0);
        assert_eq!(state.answers_for(ModuleId::Standards).len(), 1);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let content = content();
        assert!(grade(&content, ModuleId::Foundation, QuestionId::Q1, "semantic").unwrap());
        assert!(!grade(&content, ModuleId::Foundation, QuestionId::Q1, "Semantic").unwrap());
        assert!(!grade(&content, ModuleId::Foundation, QuestionId::Q1, " semantic").unwrap());
    }

    #[test]
    fn repeated_answers_grade_the_same_and_append() {
        let content = content();
        let mut state = LearnerState::default();
        let mut evaluator = AnswerEvaluator::new(&mut state, &content);
        let first = evaluator
            .evaluate(ModuleId::Master, QuestionId::Q2, "all-factors")
            .unwrap();
        let second = evaluator
            .evaluate(ModuleId::Master, QuestionId::Q2, "all-factors")
            .unwrap();
        assert_eq!(first.correct, second.correct);
        assert_eq!(state.answers_for(ModuleId::Master).len(), 2);
        assert_eq!(state.total_points(), 20);
    }

    #[test]
    fn undefined_question_is_an_error_and_records_nothing() {
        let mut content = content();
        content
            .quizzes
            .get_mut(&ModuleId::Foundation)
            .unwrap()
            .questions
            .remove(&QuestionId::Q3);
        let mut state = LearnerState::default();
        let err = AnswerEvaluator::new(&mut state, &content)
            .evaluate(ModuleId::Foundation, QuestionId::Q3, "false")
            .unwrap_err();
        assert_eq!(
            err,
            CourseError::UnknownQuestion {
                module: ModuleId::Foundation,
                question: QuestionId::Q3,
            }
        );
        assert!(state.quiz_answers().is_empty());
    }
}
