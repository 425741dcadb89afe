//! The `quizcheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizcheck_core::config::load_config_from;
use quizcheck_core::parser::{
    difficulty_distribution, lint_bank, load_bank_directory, parse_bank, DirectoryLoad,
};

pub fn execute(bank_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let bank_path = match bank_path {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.banks_dir,
    };

    let load = if bank_path.is_dir() {
        load_bank_directory(&bank_path)?
    } else {
        DirectoryLoad {
            banks: vec![parse_bank(&bank_path)?],
            failures: vec![],
        }
    };

    let mut total_warnings = 0;

    for bank in &load.banks {
        println!("Bank: {} ({} questions)", bank.title(), bank.len());

        let distribution = difficulty_distribution(bank);
        if distribution.iter().any(|(_, count)| *count > 0) {
            let counts: Vec<String> = distribution
                .iter()
                .map(|(difficulty, count)| format!("{difficulty} {count}"))
                .collect();
            println!("  Difficulty: {}", counts.join(", "));
        }

        let warnings = lint_bank(bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    for failure in &load.failures {
        println!("  ERROR: {}: {}", failure.path.display(), failure.error);
    }

    if !load.is_clean() {
        anyhow::bail!("{} bank file(s) failed to load", load.failures.len());
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
