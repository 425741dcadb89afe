//! The `quizcheck score` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizcheck_core::config::{load_config_from, OptionLabels};
use quizcheck_core::parser::parse_bank;
use quizcheck_core::{QuizEngine, QuizState, SelectionOutcome};

use super::print_summary;

pub fn execute(
    bank_path: PathBuf,
    answers: String,
    format: String,
    fail_below_pass: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = parse_bank(&bank_path)?;
    let mut quiz = QuizEngine::new(&bank)?;

    for (question_id, index) in parse_answers(&answers, config.option_labels)? {
        if quiz.select_option(&question_id, index)? == SelectionOutcome::AlreadyAnswered {
            eprintln!("Warning: question {question_id} already answered, later answer ignored");
        }
    }

    if quiz.state() != QuizState::Completed {
        eprintln!(
            "Answered {}/{} (score so far {})",
            quiz.answered_count(),
            bank.len(),
            quiz.partial_score()
        );
    }

    let summary = quiz.summary(config.pass_mark)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        "markdown" | "md" => {
            println!("{}", summary.to_markdown());
        }
        _ => {
            let mut out = io::stdout().lock();
            print_summary(&mut out, &bank, &summary, config.option_labels)?;
            out.flush()?;
        }
    }

    if fail_below_pass && !summary.passed {
        std::process::exit(1);
    }

    Ok(())
}

/// Parse `"id=label,id=label"` into `(id, zero-based index)` pairs, in order.
fn parse_answers(raw: &str, labels: OptionLabels) -> Result<Vec<(String, usize)>> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (id, label) = pair
                .split_once('=')
                .with_context(|| format!("expected id=label, got '{pair}'"))?;
            let index = labels
                .parse(label)
                .with_context(|| format!("not an option label: '{}'", label.trim()))?;
            Ok((id.trim().to_string(), index))
        })
        .collect()
}
