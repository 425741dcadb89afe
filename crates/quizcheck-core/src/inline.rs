//! InlineCheck: one question embedded in content, answered once.

use serde::Serialize;

use crate::error::AssessmentError;
use crate::model::{Question, QuestionBank};
use crate::validator::{evaluate, Evaluation};

/// Whether a selection has been locked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    Unanswered,
    Answered,
}

/// What a selection call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The selection was recorded and feedback is now available.
    Recorded,
    /// A selection was already recorded; nothing changed.
    AlreadyAnswered,
}

/// Single-question state machine: `Unanswered -> Answered`.
#[derive(Debug, Clone)]
pub struct InlineCheck<'a> {
    question: &'a Question,
    feedback: Option<Evaluation>,
}

impl<'a> InlineCheck<'a> {
    pub fn new(question: &'a Question) -> Self {
        Self {
            question,
            feedback: None,
        }
    }

    /// Check for the question with `id` in `bank`.
    pub fn from_bank(bank: &'a QuestionBank, id: &str) -> Result<Self, AssessmentError> {
        bank.question(id)
            .map(Self::new)
            .ok_or_else(|| AssessmentError::UnknownQuestion(id.into()))
    }

    pub fn question(&self) -> &'a Question {
        self.question
    }

    pub fn state(&self) -> CheckState {
        if self.feedback.is_some() {
            CheckState::Answered
        } else {
            CheckState::Unanswered
        }
    }

    /// Record the learner's choice. First answer wins.
    ///
    /// The index is range-checked on every call, answered or not.
    pub fn select_option(&mut self, index: usize) -> Result<SelectionOutcome, AssessmentError> {
        let evaluation = evaluate(self.question, index)?;
        if self.feedback.is_some() {
            tracing::warn!(question = %self.question.id(), index, "ignoring repeat selection");
            return Ok(SelectionOutcome::AlreadyAnswered);
        }

        tracing::debug!(
            question = %self.question.id(),
            index,
            correct = evaluation.is_correct,
            "inline check answered"
        );
        self.feedback = Some(evaluation);
        Ok(SelectionOutcome::Recorded)
    }

    pub fn feedback(&self) -> Option<&Evaluation> {
        self.feedback.as_ref()
    }

    pub fn chosen_index(&self) -> Option<usize> {
        self.feedback.as_ref().map(|f| f.chosen_index)
    }

    /// Back to `Unanswered`, for hosts that offer "try again".
    pub fn reset(&mut self) {
        self.feedback = None;
    }
}
