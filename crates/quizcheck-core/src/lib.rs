//! quizcheck-core — question model, validation, and assessment state machines.
//!
//! This crate defines the validated question data model, the single-question
//! evaluator, and the two engines built on it: [`inline::InlineCheck`] for
//! one embedded question and [`quiz::QuizEngine`] for a scored quiz.

pub mod config;
pub mod error;
pub mod inline;
pub mod model;
pub mod parser;
pub mod quiz;
pub mod score;
pub mod validator;

pub use error::{AssessmentError, AuthoringError};
pub use inline::{CheckState, InlineCheck, SelectionOutcome};
pub use model::{CorrectIndex, Difficulty, Question, QuestionBank, QuestionId};
pub use quiz::{QuestionView, QuizEngine, QuizState};
pub use score::{AttemptSummary, PassMark, Score};
pub use validator::{evaluate, Evaluation};
