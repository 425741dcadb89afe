//! Single-question evaluation shared by both engines.

use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;
use crate::model::{Question, QuestionId};

/// Feedback for one answered question.
///
/// The explanation is carried whether or not the learner was right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub question_id: QuestionId,
    pub chosen_index: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

/// Evaluate a learner's selection against a question.
///
/// Fails with [`AssessmentError::SelectionOutOfRange`] when `selected` is not
/// one of the question's options; such a call is never scored as wrong.
pub fn evaluate(question: &Question, selected: usize) -> Result<Evaluation, AssessmentError> {
    if selected >= question.option_count() {
        return Err(AssessmentError::SelectionOutOfRange {
            question_id: question.id().clone(),
            index: selected,
            option_count: question.option_count(),
        });
    }

    let correct = question.correct_index();
    Ok(Evaluation {
        question_id: question.id().clone(),
        chosen_index: selected,
        correct_index: correct.get(),
        is_correct: correct.matches(selected),
        explanation: question.explanation().to_string(),
    })
}
