//! The `quizcheck check` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use quizcheck_core::config::load_config_from;
use quizcheck_core::parser::parse_bank;
use quizcheck_core::InlineCheck;

use super::{print_feedback, print_question};

pub fn execute(
    bank_path: PathBuf,
    question_id: String,
    answer: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let labels = config.option_labels;
    let bank = parse_bank(&bank_path)?;
    let mut check = InlineCheck::from_bank(&bank, &question_id)?;

    let index = labels
        .parse(&answer)
        .ok_or_else(|| anyhow::anyhow!("not an option label: '{answer}'"))?;
    check.select_option(index)?;

    let mut out = io::stdout().lock();
    let position = bank.position(&question_id).unwrap_or_default();
    print_question(&mut out, check.question(), position + 1, bank.len(), labels)?;
    if let Some(evaluation) = check.feedback() {
        print_feedback(&mut out, check.question(), evaluation, labels)?;
    }
    out.flush()?;

    Ok(())
}
