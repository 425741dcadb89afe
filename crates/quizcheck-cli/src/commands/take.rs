//! The `quizcheck take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use quizcheck_core::config::load_config_from;
use quizcheck_core::parser::parse_bank;
use quizcheck_core::{AssessmentError, QuizEngine, QuizState};

use super::{print_feedback, print_question, print_summary};

pub fn execute(bank_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = parse_bank(&bank_path)?;
    let mut quiz = QuizEngine::new(&bank)?;
    let labels = config.option_labels;

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    let mut out = io::stdout().lock();

    writeln!(out, "{} ({} questions)", bank.title(), bank.len())?;
    writeln!(out, "Answer with an option label, 'r' to restart, 'q' to quit.")?;

    loop {
        if quiz.state() == QuizState::Completed {
            let summary = quiz.summary(config.pass_mark)?;
            print_summary(&mut out, &bank, &summary, labels)?;

            write!(out, "\nRestart? [y/N] ")?;
            out.flush()?;
            match input.next().transpose()? {
                Some(line) if line.trim().eq_ignore_ascii_case("y") => {
                    quiz.restart();
                    writeln!(out, "Starting attempt {}.", quiz.attempt())?;
                    continue;
                }
                _ => break,
            }
        }

        let question = quiz
            .next_unanswered()
            .context("quiz is in progress but every question is answered")?;
        let position = bank.position(question.id().as_str()).unwrap_or_default();
        print_question(&mut out, question, position + 1, bank.len(), labels)?;

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = input.next().transpose()? else {
            writeln!(out)?;
            abandon(&mut out, &quiz)?;
            break;
        };

        match line.trim() {
            "q" | "Q" => {
                abandon(&mut out, &quiz)?;
                break;
            }
            "r" | "R" => {
                quiz.restart();
                writeln!(out, "Restarted. Starting attempt {}.", quiz.attempt())?;
            }
            answer => {
                let Some(index) = labels.parse(answer) else {
                    writeln!(out, "Not an option: {answer}")?;
                    continue;
                };
                match quiz.select_option(question.id().as_str(), index) {
                    Ok(_) => {}
                    Err(AssessmentError::SelectionOutOfRange { .. }) => {
                        writeln!(out, "Not an option: {answer}")?;
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }

                if let Some(evaluation) = quiz.feedback(question.id().as_str())? {
                    print_feedback(&mut out, question, evaluation, labels)?;
                }
                if config.show_partial_score && quiz.state() == QuizState::InProgress {
                    writeln!(out, "Score so far: {}", quiz.partial_score())?;
                }
            }
        }
    }

    Ok(())
}

fn abandon(out: &mut impl Write, quiz: &QuizEngine<'_>) -> io::Result<()> {
    if quiz.state() != QuizState::Completed {
        writeln!(
            out,
            "Quiz left unfinished: {}/{} answered.",
            quiz.answered_count(),
            quiz.bank().len()
        )?;
    }
    Ok(())
}
