//! QuizEngine: an ordered bank answered as one assessment.
//!
//! State moves `NotStarted -> InProgress -> Completed` through
//! [`QuizEngine::select_option`] and back to `NotStarted` through
//! [`QuizEngine::restart`]. Nothing else mutates an attempt.

use serde::Serialize;

use crate::error::{AssessmentError, AuthoringError};
use crate::inline::SelectionOutcome;
use crate::model::{Question, QuestionBank};
use crate::score::{category_breakdown, AttemptSummary, PassMark, Score};
use crate::validator::{evaluate, Evaluation};

/// Aggregate state the display layer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    NotStarted,
    InProgress,
    Completed,
}

/// One question as the display layer sees it.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView<'a> {
    pub position: usize,
    pub question: &'a Question,
    pub feedback: Option<&'a Evaluation>,
}

/// Multi-question assessment over a borrowed bank.
#[derive(Debug, Clone)]
pub struct QuizEngine<'a> {
    bank: &'a QuestionBank,
    answers: Vec<Option<Evaluation>>,
    state: QuizState,
    attempt: u32,
}

impl<'a> QuizEngine<'a> {
    /// Start a fresh attempt. An empty bank is rejected.
    pub fn new(bank: &'a QuestionBank) -> Result<Self, AuthoringError> {
        if bank.is_empty() {
            return Err(AuthoringError::EmptyBank {
                bank: bank.id().to_string(),
            });
        }

        Ok(Self {
            bank,
            answers: vec![None; bank.len()],
            state: QuizState::NotStarted,
            attempt: 1,
        })
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    /// 1-based attempt counter; each restart begins a new attempt.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    /// Record a selection for `question_id`. First answer per question wins.
    pub fn select_option(
        &mut self,
        question_id: &str,
        index: usize,
    ) -> Result<SelectionOutcome, AssessmentError> {
        let position = self
            .bank
            .position(question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.into()))?;
        let evaluation = evaluate(&self.bank.questions()[position], index)?;

        let slot = &mut self.answers[position];
        if slot.is_some() {
            tracing::warn!(question = question_id, index, "ignoring repeat selection");
            return Ok(SelectionOutcome::AlreadyAnswered);
        }
        *slot = Some(evaluation);

        let answered = self.answered_count();
        let next = if answered == self.answers.len() {
            QuizState::Completed
        } else {
            QuizState::InProgress
        };
        if next != self.state {
            tracing::debug!(
                bank = self.bank.id(),
                from = ?self.state,
                to = ?next,
                answered,
                "quiz state changed"
            );
        }
        self.state = next;

        Ok(SelectionOutcome::Recorded)
    }

    /// Final score. Only available once every question is answered.
    pub fn score(&self) -> Result<Score, AssessmentError> {
        self.ensure_completed()?;
        Ok(self.partial_score())
    }

    /// Correct answers so far over the full bank size, at any point in the attempt.
    pub fn partial_score(&self) -> Score {
        let correct = self
            .answers
            .iter()
            .flatten()
            .filter(|e| e.is_correct)
            .count();
        Score::new(correct, self.answers.len())
    }

    /// Discard every selection and begin a new attempt.
    pub fn restart(&mut self) {
        tracing::debug!(
            bank = self.bank.id(),
            attempt = self.attempt,
            answered = self.answered_count(),
            "quiz restarted"
        );
        self.answers.iter_mut().for_each(|a| *a = None);
        self.state = QuizState::NotStarted;
        self.attempt += 1;
    }

    /// Feedback recorded for one question, if it has been answered.
    pub fn feedback(&self, question_id: &str) -> Result<Option<&Evaluation>, AssessmentError> {
        let position = self
            .bank
            .position(question_id)
            .ok_or_else(|| AssessmentError::UnknownQuestion(question_id.into()))?;
        Ok(self.answers[position].as_ref())
    }

    /// Every question in bank order with whatever feedback exists.
    pub fn views(&self) -> Vec<QuestionView<'_>> {
        self.bank
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(position, (question, answer))| QuestionView {
                position,
                question,
                feedback: answer.as_ref(),
            })
            .collect()
    }

    /// First question in bank order still waiting for an answer.
    pub fn next_unanswered(&self) -> Option<&'a Question> {
        let bank = self.bank;
        self.answers
            .iter()
            .position(Option::is_none)
            .map(|pos| &bank.questions()[pos])
    }

    /// All evaluations in bank order, for the post-quiz review.
    pub fn review(&self) -> Result<Vec<Evaluation>, AssessmentError> {
        self.ensure_completed()?;
        Ok(self.answers.iter().flatten().cloned().collect())
    }

    /// Summary of the completed attempt.
    ///
    /// The bank's own pass mark takes precedence over `default_pass_mark`.
    pub fn summary(&self, default_pass_mark: PassMark) -> Result<AttemptSummary, AssessmentError> {
        let score = self.score()?;
        let evaluations = self.review()?;
        let pass_mark = self.bank.pass_mark().unwrap_or(default_pass_mark);

        Ok(AttemptSummary {
            bank_id: self.bank.id().to_string(),
            bank_title: self.bank.title().to_string(),
            attempt: self.attempt,
            score,
            percentage: score.percentage(),
            pass_mark,
            passed: score.passes(pass_mark),
            categories: category_breakdown(self.bank, &evaluations),
            evaluations,
        })
    }

    fn ensure_completed(&self) -> Result<(), AssessmentError> {
        if self.state == QuizState::Completed {
            return Ok(());
        }
        Err(AssessmentError::NotCompleted {
            answered: self.answered_count(),
            total: self.answers.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Three questions; correct answers are 0, 2, 1.
    fn section_bank() -> QuestionBank {
        let questions = vec![
            Question::new(
                "1",
                "What is the full title of the primary COSHH legislation?",
                [
                    "Control of Substances Hazardous to Health Regulations 2002",
                    "Control of Substances Harmful to Health Act 2002",
                    "Hazardous Substances Control Act 1999",
                ],
                0,
                "COSHH is the Control of Substances Hazardous to Health Regulations 2002.",
            )
            .unwrap()
            .with_category("Legislation"),
            Question::new(
                "2",
                "Which is the last resort in the hierarchy of control?",
                ["Elimination", "Substitution", "PPE"],
                2,
                "PPE only protects the wearer and only while worn correctly.",
            )
            .unwrap()
            .with_category("Control"),
            Question::new(
                "3",
                "What minimum insulation resistance applies to a 230 V circuit?",
                ["0.5 MΩ", "1 MΩ", "2 MΩ"],
                1,
                "BS 7671 requires at least 1 MΩ for circuits up to 500 V.",
            )
            .unwrap(),
        ];
        QuestionBank::new("section-1", "Section 1 Knowledge Check", questions).unwrap()
    }

    fn single_bank() -> QuestionBank {
        let q = Question::new("only", "Unit of resistance?", ["Ohm", "Amp"], 0, "Resistance is in ohms.")
            .unwrap();
        QuestionBank::new("single", "Single", vec![q]).unwrap()
    }

    #[test]
    fn empty_bank_is_rejected() {
        let bank = QuestionBank::new("empty", "Empty", vec![]).unwrap();
        assert_eq!(
            QuizEngine::new(&bank).unwrap_err(),
            AuthoringError::EmptyBank {
                bank: "empty".into()
            }
        );
    }

    #[test]
    fn single_question_completes_immediately() {
        let bank = single_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        assert_eq!(quiz.state(), QuizState::NotStarted);

        quiz.select_option("only", 0).unwrap();
        assert_eq!(quiz.state(), QuizState::Completed);
        assert_eq!(quiz.score().unwrap(), Score::new(1, 1));
    }

    #[test]
    fn out_of_order_answers_score_correctly() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();

        quiz.select_option("3", 1).unwrap();
        assert_eq!(quiz.state(), QuizState::InProgress);
        quiz.select_option("1", 0).unwrap();
        quiz.select_option("2", 0).unwrap();

        assert_eq!(quiz.state(), QuizState::Completed);
        assert_eq!(quiz.score().unwrap(), Score::new(2, 3));
    }

    #[test]
    fn completion_requires_every_question() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        quiz.select_option("1", 0).unwrap();
        quiz.select_option("2", 2).unwrap();

        // Repeat selections never stand in for the missing answer.
        for _ in 0..5 {
            quiz.select_option("1", 1).unwrap();
            quiz.select_option("2", 0).unwrap();
        }
        assert_eq!(quiz.state(), QuizState::InProgress);
        assert_eq!(
            quiz.score().unwrap_err(),
            AssessmentError::NotCompleted {
                answered: 2,
                total: 3
            }
        );
        assert_eq!(quiz.next_unanswered().map(|q| q.id().as_str()), Some("3"));
    }

    #[test]
    fn first_selection_wins() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();

        assert_eq!(quiz.select_option("2", 0).unwrap(), SelectionOutcome::Recorded);
        assert_eq!(
            quiz.select_option("2", 2).unwrap(),
            SelectionOutcome::AlreadyAnswered
        );
        quiz.select_option("1", 0).unwrap();
        quiz.select_option("3", 1).unwrap();

        assert_eq!(quiz.feedback("2").unwrap().unwrap().chosen_index, 0);
        assert_eq!(quiz.score().unwrap(), Score::new(2, 3));
    }

    #[test]
    fn score_is_repeatable() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        for (id, sel) in [("1", 0), ("2", 1), ("3", 1)] {
            quiz.select_option(id, sel).unwrap();
        }
        let first = quiz.score().unwrap();
        assert_eq!(quiz.score().unwrap(), first);
        assert_eq!(quiz.review().unwrap(), quiz.review().unwrap());
    }

    #[test]
    fn restart_is_a_full_reset() {
        let bank = section_bank();
        for picks in [[0, 2, 1], [1, 0, 0]] {
            let mut quiz = QuizEngine::new(&bank).unwrap();
            for (id, sel) in ["1", "2", "3"].into_iter().zip(picks) {
                quiz.select_option(id, sel).unwrap();
            }
            assert_eq!(quiz.state(), QuizState::Completed);

            quiz.restart();
            assert_eq!(quiz.state(), QuizState::NotStarted);
            assert_eq!(quiz.attempt(), 2);
            assert_eq!(quiz.answered_count(), 0);
            assert_eq!(quiz.partial_score(), Score::new(0, 3));
            assert!(quiz.score().is_err());
            assert!(quiz.views().iter().all(|v| v.feedback.is_none()));

            // A fresh attempt accepts new answers for the same questions.
            quiz.select_option("1", 1).unwrap();
            assert_eq!(quiz.feedback("1").unwrap().unwrap().chosen_index, 1);
        }
    }

    #[test]
    fn invalid_calls_are_signalled() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        assert_eq!(
            quiz.select_option("99", 0).unwrap_err(),
            AssessmentError::UnknownQuestion("99".into())
        );
        assert!(matches!(
            quiz.select_option("1", 3),
            Err(AssessmentError::SelectionOutOfRange { index: 3, .. })
        ));
        assert_eq!(quiz.state(), QuizState::NotStarted);
        assert!(quiz.feedback("99").is_err());
    }

    #[test]
    fn partial_score_tracks_progress() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        quiz.select_option("1", 0).unwrap();
        assert_eq!(quiz.partial_score(), Score::new(1, 3));
        quiz.select_option("2", 0).unwrap();
        assert_eq!(quiz.partial_score(), Score::new(1, 3));
    }

    #[test]
    fn summary_uses_bank_pass_mark_first() {
        let bank = section_bank().with_pass_mark(PassMark::new(60).unwrap());
        let mut quiz = QuizEngine::new(&bank).unwrap();
        for (id, sel) in [("1", 0), ("2", 2), ("3", 0)] {
            quiz.select_option(id, sel).unwrap();
        }

        let summary = quiz.summary(PassMark::default()).unwrap();
        assert_eq!(summary.pass_mark.get(), 60);
        assert!(summary.passed);
        assert_eq!(summary.score, Score::new(2, 3));
        assert_eq!(summary.evaluations.len(), 3);
        assert_eq!(summary.incorrect().count(), 1);
        assert_eq!(summary.categories.len(), 3);
        assert!(summary.to_markdown().contains("Section 1 Knowledge Check"));
    }

    #[test]
    fn views_follow_bank_order() {
        let bank = section_bank();
        let mut quiz = QuizEngine::new(&bank).unwrap();
        quiz.select_option("2", 2).unwrap();
        let views = quiz.views();
        let ids: Vec<_> = views.iter().map(|v| v.question.id().as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(views[0].feedback.is_none());
        assert!(views[1].feedback.unwrap().is_correct);
    }
}
