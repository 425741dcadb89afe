//! Subcommands and the terminal rendering they share.

use std::io::{self, Write};

use comfy_table::{Cell, Table};

use quizcheck_core::config::OptionLabels;
use quizcheck_core::model::Question;
use quizcheck_core::score::AttemptSummary;
use quizcheck_core::validator::Evaluation;
use quizcheck_core::QuestionBank;

pub mod check;
pub mod init;
pub mod score;
pub mod take;
pub mod validate;

/// Print a question with labelled options.
pub fn print_question(
    out: &mut impl Write,
    question: &Question,
    number: usize,
    total: usize,
    labels: OptionLabels,
) -> io::Result<()> {
    writeln!(out, "\nQuestion {number} of {total}: {}", question.prompt())?;
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "  {}) {option}", labels.label(i))?;
    }
    Ok(())
}

/// Print the feedback for one answered question.
///
/// The correct option and the explanation are shown whatever the outcome.
pub fn print_feedback(
    out: &mut impl Write,
    question: &Question,
    evaluation: &Evaluation,
    labels: OptionLabels,
) -> io::Result<()> {
    let verdict = if evaluation.is_correct {
        "Correct!"
    } else {
        "Incorrect."
    };
    let option = |i: usize| format!("{}) {}", labels.label(i), question.options()[i]);

    writeln!(out, "{verdict}")?;
    writeln!(out, "  Your answer:    {}", option(evaluation.chosen_index))?;
    writeln!(out, "  Correct answer: {}", option(evaluation.correct_index))?;
    writeln!(out, "  {}", evaluation.explanation)?;
    Ok(())
}

/// Print the results screen of a completed attempt: score, categories, review.
pub fn print_summary(
    out: &mut impl Write,
    bank: &QuestionBank,
    summary: &AttemptSummary,
    labels: OptionLabels,
) -> io::Result<()> {
    writeln!(out, "\n{} (attempt {})", summary.bank_title, summary.attempt)?;
    writeln!(
        out,
        "Score: {} ({:.0}%), pass mark {}: {}",
        summary.score,
        summary.percentage,
        summary.pass_mark,
        if summary.passed { "PASSED" } else { "NOT PASSED" }
    )?;

    if summary.categories.len() > 1 {
        let mut table = Table::new();
        table.set_header(vec!["Category", "Score", "%"]);
        for c in &summary.categories {
            table.add_row(vec![
                Cell::new(&c.category),
                Cell::new(c.score.to_string()),
                Cell::new(format!("{:.0}%", c.score.percentage())),
            ]);
        }
        writeln!(out, "\n{table}")?;
    }

    writeln!(out, "\nReview:")?;
    for (number, evaluation) in summary.evaluations.iter().enumerate() {
        let Some(question) = bank.question(evaluation.question_id.as_str()) else {
            continue;
        };
        writeln!(out, "\n{}. {}", number + 1, question.prompt())?;
        print_feedback(out, question, evaluation, labels)?;
    }

    Ok(())
}
