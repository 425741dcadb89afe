//! Core data model types for quizcheck.
//!
//! A [`Question`] can only exist in a valid shape: every constructor and the
//! serde path run the same checks, so the engines never see malformed data.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AuthoringError;
use crate::score::PassMark;

/// Key of a question within one bank.
///
/// Source data uses both numbers and strings; both are accepted and held as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawQuestionId", into = "String")]
pub struct QuestionId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionId {
    Number(i64),
    Text(String),
}

impl From<RawQuestionId> for QuestionId {
    fn from(raw: RawQuestionId) -> Self {
        match raw {
            RawQuestionId::Number(n) => QuestionId(n.to_string()),
            RawQuestionId::Text(s) => QuestionId(s),
        }
    }
}

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuestionId {
    fn from(s: &str) -> Self {
        QuestionId(s.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(s: String) -> Self {
        QuestionId(s)
    }
}

impl From<u32> for QuestionId {
    fn from(n: u32) -> Self {
        QuestionId(n.to_string())
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl Borrow<str> for QuestionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Position of the single correct option, checked against the option count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CorrectIndex(usize);

impl CorrectIndex {
    /// Returns `None` when `index` does not address one of `option_count` options.
    pub fn new(index: usize, option_count: usize) -> Option<Self> {
        (index < option_count).then_some(CorrectIndex(index))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn matches(self, selected: usize) -> bool {
        self.0 == selected
    }
}

/// Authored difficulty band.
///
/// `easy`, `medium` and `hard` are accepted as aliases when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Basic,
    #[serde(alias = "medium")]
    Intermediate,
    #[serde(alias = "hard")]
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Recommended share of a bank at this difficulty, as an inclusive
    /// `(min, max)` percentage range.
    pub fn recommended_share(self) -> (f64, f64) {
        match self {
            Difficulty::Basic => (30.0, 50.0),
            Difficulty::Intermediate => (35.0, 55.0),
            Difficulty::Advanced => (10.0, 25.0),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Basic => write!(f, "basic"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// A single-correct-answer multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_index: CorrectIndex,
    explanation: String,
    category: Option<String>,
    difficulty: Option<Difficulty>,
}

impl Question {
    /// Build a question, rejecting any shape that could mis-score a learner.
    pub fn new<I, S>(
        id: impl Into<QuestionId>,
        prompt: impl Into<String>,
        options: I,
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, AuthoringError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let prompt = prompt.into();
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let explanation = explanation.into();

        if prompt.trim().is_empty() {
            return Err(AuthoringError::EmptyPrompt { id });
        }
        if options.len() < 2 {
            return Err(AuthoringError::TooFewOptions {
                id,
                count: options.len(),
            });
        }
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(AuthoringError::BlankOption { id, index });
        }
        let Some(correct_index) = CorrectIndex::new(correct_index, options.len()) else {
            return Err(AuthoringError::CorrectIndexOutOfRange {
                id,
                index: correct_index,
                option_count: options.len(),
            });
        };
        if explanation.trim().is_empty() {
            return Err(AuthoringError::EmptyExplanation { id });
        }

        Ok(Self {
            id,
            prompt,
            options,
            correct_index,
            explanation,
            category: None,
            difficulty: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.trim().is_empty()).then_some(category);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn correct_index(&self) -> CorrectIndex {
        self.correct_index
    }

    /// Text of the correct option.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index.get()]
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }
}

/// Wire shape of a question, before validation.
///
/// Accepts the field spellings found in authored course data
/// (`question`/`prompt`, `correctIndex`/`correctAnswer`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    #[serde(alias = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(
        alias = "correctIndex",
        alias = "correctAnswer",
        alias = "correct_answer"
    )]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = AuthoringError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let mut question = Question::new(
            record.id,
            record.prompt,
            record.options,
            record.correct_index,
            record.explanation,
        )?;
        if let Some(category) = record.category {
            question = question.with_category(category);
        }
        question.difficulty = record.difficulty;
        Ok(question)
    }
}

impl From<Question> for QuestionRecord {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            prompt: q.prompt,
            options: q.options,
            correct_index: q.correct_index.get(),
            explanation: q.explanation,
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// An ordered, author-supplied list of questions forming one assessment.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    id: String,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pass_mark: Option<PassMark>,
    questions: Vec<Question>,
    #[serde(skip)]
    positions: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Build a bank, rejecting duplicate question ids.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, AuthoringError> {
        let id = id.into();
        let mut positions = HashMap::with_capacity(questions.len());
        for (pos, q) in questions.iter().enumerate() {
            if positions.insert(q.id().clone(), pos).is_some() {
                return Err(AuthoringError::DuplicateQuestionId {
                    bank: id,
                    id: q.id().clone(),
                });
            }
        }

        Ok(Self {
            id,
            title: title.into(),
            pass_mark: None,
            questions,
            positions,
        })
    }

    pub fn with_pass_mark(mut self, pass_mark: PassMark) -> Self {
        self.pass_mark = Some(pass_mark);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Pass mark authored on the bank itself, if any.
    pub fn pass_mark(&self) -> Option<PassMark> {
        self.pass_mark
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.position(id).map(|pos| &self.questions[pos])
    }

    /// Declared position of a question in the bank.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ohms_law() -> Question {
        Question::new(
            "ohm",
            "Which formula expresses Ohm's law?",
            ["P = IV", "V = IR", "Q = It"],
            1,
            "Voltage equals current multiplied by resistance.",
        )
        .unwrap()
    }

    #[test]
    fn question_accessors() {
        let q = ohms_law();
        assert_eq!(q.id().as_str(), "ohm");
        assert_eq!(q.option_count(), 3);
        assert_eq!(q.correct_index().get(), 1);
        assert_eq!(q.correct_option(), "V = IR");
        assert!(q.category().is_none());
    }

    #[test]
    fn correct_index_equal_to_option_count_is_rejected() {
        let err = Question::new("q", "Prompt", ["a", "b"], 2, "Because.").unwrap_err();
        assert_eq!(
            err,
            AuthoringError::CorrectIndexOutOfRange {
                id: "q".into(),
                index: 2,
                option_count: 2,
            }
        );
    }

    #[test]
    fn malformed_questions_are_rejected() {
        assert!(matches!(
            Question::new("q", "  ", ["a", "b"], 0, "x"),
            Err(AuthoringError::EmptyPrompt { .. })
        ));
        assert!(matches!(
            Question::new("q", "Prompt", ["only"], 0, "x"),
            Err(AuthoringError::TooFewOptions { count: 1, .. })
        ));
        assert!(matches!(
            Question::new("q", "Prompt", Vec::<String>::new(), 0, "x"),
            Err(AuthoringError::TooFewOptions { count: 0, .. })
        ));
        assert!(matches!(
            Question::new("q", "Prompt", ["a", ""], 0, "x"),
            Err(AuthoringError::BlankOption { index: 1, .. })
        ));
        assert!(matches!(
            Question::new("q", "Prompt", ["a", "b"], 0, ""),
            Err(AuthoringError::EmptyExplanation { .. })
        ));
    }

    #[test]
    fn record_accepts_authored_field_names() {
        let json = r#"{
            "id": 7,
            "question": "What does RCD stand for?",
            "options": ["Residual current device", "Rapid cut-off device"],
            "correctAnswer": 0,
            "explanation": "An RCD detects earth leakage current.",
            "category": "Protection",
            "difficulty": "basic"
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id().as_str(), "7");
        assert_eq!(q.category(), Some("Protection"));
        assert_eq!(q.difficulty(), Some(Difficulty::Basic));

        let json = r#"{
            "id": "coshh-stands-for",
            "question": "What does COSHH stand for?",
            "options": ["a", "b", "c"],
            "correctIndex": 2,
            "explanation": "It is c."
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_index().get(), 2);
    }

    #[test]
    fn record_without_explanation_fails_validation() {
        let json = r#"{"id": 1, "question": "Q?", "options": ["a", "b"], "correctAnswer": 0}"#;
        let err = serde_json::from_str::<Question>(json).unwrap_err();
        assert!(err.to_string().contains("explanation is empty"), "{err}");
    }

    #[test]
    fn bank_rejects_duplicate_ids() {
        let err = QuestionBank::new("b", "Bank", vec![ohms_law(), ohms_law()]).unwrap_err();
        assert_eq!(
            err,
            AuthoringError::DuplicateQuestionId {
                bank: "b".into(),
                id: "ohm".into(),
            }
        );
    }

    #[test]
    fn bank_lookup_by_id() {
        let other = Question::new("watt", "Unit of power?", ["Watt", "Volt"], 0, "Power is in watts.")
            .unwrap();
        let bank = QuestionBank::new("b", "Bank", vec![ohms_law(), other]).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.position("watt"), Some(1));
        assert_eq!(
            bank.question("ohm").map(|q| q.prompt()),
            Some("Which formula expresses Ohm's law?")
        );
        assert!(bank.question("missing").is_none());
    }

    #[test]
    fn difficulty_spellings() {
        let parse = |s: &str| serde_json::from_str::<Difficulty>(&format!("\"{s}\""));
        assert_eq!(parse("hard").unwrap(), Difficulty::Advanced);
        assert_eq!(parse("medium").unwrap(), Difficulty::Intermediate);
        assert_eq!(parse("basic").unwrap(), Difficulty::Basic);
        assert!(parse("expert").is_err());
        assert_eq!(Difficulty::Intermediate.to_string(), "intermediate");
        assert_eq!(
            serde_json::to_string(&Difficulty::Basic).unwrap(),
            "\"basic\""
        );
    }
}
