//! Assessment error types.
//!
//! Two families: [`AuthoringError`] for malformed question data (caught when a
//! question or bank is built) and [`AssessmentError`] for operations a host
//! called against a valid bank in a way the contract forbids. A learner picking
//! the wrong option is neither; that is an ordinary [`crate::validator::Evaluation`].

use thiserror::Error;

use crate::model::QuestionId;

/// A defect in authored question data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthoringError {
    /// The question text is empty or whitespace.
    #[error("question {id}: prompt is empty")]
    EmptyPrompt { id: QuestionId },

    /// Fewer than two answer options were supplied.
    #[error("question {id}: needs at least 2 options, found {count}")]
    TooFewOptions { id: QuestionId, count: usize },

    /// One of the options is empty or whitespace.
    #[error("question {id}: option {index} is blank")]
    BlankOption { id: QuestionId, index: usize },

    /// The recorded correct answer does not point at an option.
    #[error("question {id}: correct index {index} is out of range for {option_count} options")]
    CorrectIndexOutOfRange {
        id: QuestionId,
        index: usize,
        option_count: usize,
    },

    /// No explanation was supplied.
    #[error("question {id}: explanation is empty")]
    EmptyExplanation { id: QuestionId },

    /// Two questions in one bank share an id.
    #[error("bank {bank}: duplicate question id {id}")]
    DuplicateQuestionId { bank: String, id: QuestionId },

    /// A quiz was built over a bank with no questions.
    #[error("bank {bank}: a quiz needs at least one question")]
    EmptyBank { bank: String },

    /// A pass mark outside 0..=100.
    #[error("pass mark must be between 0 and 100, got {0}")]
    InvalidPassMark(u32),
}

/// A host called an engine operation outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The selected option index is not a valid position in the question's options.
    #[error("question {question_id}: option {index} is out of range for {option_count} options")]
    SelectionOutOfRange {
        question_id: QuestionId,
        index: usize,
        option_count: usize,
    },

    /// No question with this id exists in the bank.
    #[error("unknown question id: {0}")]
    UnknownQuestion(QuestionId),

    /// A completed-only operation was called before every question was answered.
    #[error("quiz is not completed: {answered}/{total} questions answered")]
    NotCompleted { answered: usize, total: usize },

    #[error(transparent)]
    Authoring(#[from] AuthoringError),
}
