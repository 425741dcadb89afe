//! Scores, pass marks, and per-category breakdowns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AuthoringError;
use crate::model::QuestionBank;
use crate::validator::Evaluation;

/// Bucket for questions that carry no category.
pub const UNCATEGORISED: &str = "General";

/// Correct answers over the fixed bank size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct_count: usize,
    pub total_count: usize,
}

impl Score {
    pub fn new(correct_count: usize, total_count: usize) -> Self {
        Self {
            correct_count,
            total_count,
        }
    }

    /// Percentage correct, 0.0 for an empty total.
    pub fn percentage(&self) -> f64 {
        if self.total_count == 0 {
            return 0.0;
        }
        self.correct_count as f64 / self.total_count as f64 * 100.0
    }

    pub fn is_perfect(&self) -> bool {
        self.total_count > 0 && self.correct_count == self.total_count
    }

    pub fn passes(&self, pass_mark: PassMark) -> bool {
        self.percentage() >= f64::from(pass_mark.get())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct_count, self.total_count)
    }
}

/// Minimum percentage needed to pass, 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PassMark(u8);

impl PassMark {
    pub fn new(percent: u32) -> Result<Self, AuthoringError> {
        u8::try_from(percent)
            .ok()
            .filter(|p| *p <= 100)
            .map(PassMark)
            .ok_or(AuthoringError::InvalidPassMark(percent))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for PassMark {
    fn default() -> Self {
        PassMark(80)
    }
}

impl TryFrom<u32> for PassMark {
    type Error = AuthoringError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PassMark::new(value)
    }
}

impl From<PassMark> for u32 {
    fn from(mark: PassMark) -> Self {
        u32::from(mark.0)
    }
}

impl fmt::Display for PassMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Score for one category of a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub score: Score,
}

/// Group evaluations by question category, in order of first appearance in the bank.
///
/// Questions without a category land in [`UNCATEGORISED`]. Evaluations for ids
/// not in the bank are ignored.
pub fn category_breakdown(bank: &QuestionBank, evaluations: &[Evaluation]) -> Vec<CategoryScore> {
    let mut breakdown: Vec<CategoryScore> = Vec::new();

    for question in bank {
        let category = question.category().unwrap_or(UNCATEGORISED);
        let correct = evaluations
            .iter()
            .any(|e| &e.question_id == question.id() && e.is_correct);

        let entry = match breakdown.iter().position(|c| c.category == category) {
            Some(pos) => &mut breakdown[pos],
            None => {
                breakdown.push(CategoryScore {
                    category: category.to_string(),
                    score: Score::new(0, 0),
                });
                let last = breakdown.len() - 1;
                &mut breakdown[last]
            }
        };
        entry.score.total_count += 1;
        if correct {
            entry.score.correct_count += 1;
        }
    }

    breakdown
}

/// Display-ready summary of a completed attempt.
///
/// Built on demand from engine state; nothing here is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub bank_id: String,
    pub bank_title: String,
    pub attempt: u32,
    pub score: Score,
    pub percentage: f64,
    pub pass_mark: PassMark,
    pub passed: bool,
    pub categories: Vec<CategoryScore>,
    pub evaluations: Vec<Evaluation>,
}

impl AttemptSummary {
    /// Evaluations the learner got wrong, in bank order.
    pub fn incorrect(&self) -> impl Iterator<Item = &Evaluation> {
        self.evaluations.iter().filter(|e| !e.is_correct)
    }

    /// Format the summary as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.bank_title));
        md.push_str(&format!(
            "**Score:** {} ({:.0}%) | **Pass mark:** {} | **Result:** {}\n\n",
            self.score,
            self.percentage,
            self.pass_mark,
            if self.passed { "PASS" } else { "FAIL" }
        ));

        if self.categories.len() > 1 {
            md.push_str("| Category | Score | % |\n");
            md.push_str("|----------|-------|---|\n");
            for c in &self.categories {
                md.push_str(&format!(
                    "| {} | {} | {:.0}% |\n",
                    c.category,
                    c.score,
                    c.score.percentage()
                ));
            }
            md.push('\n');
        }

        md.push_str("### Review\n\n");
        for e in &self.evaluations {
            let mark = if e.is_correct { "correct" } else { "incorrect" };
            md.push_str(&format!("- **{}** ({mark}): {}\n", e.question_id, e.explanation));
        }

        md
    }
}
