//! Question bank loader.
//!
//! Loads banks from TOML or JSON files and directories, and lints them for
//! authoring smells that are legal but worth a second look.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Difficulty, Question, QuestionBank, QuestionId, QuestionRecord};
use crate::score::PassMark;

/// On-disk encoding of a bank file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Toml,
    Json,
}

impl BankFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(BankFormat::Toml),
            "json" => Some(BankFormat::Json),
            _ => None,
        }
    }
}

/// Intermediate structure shared by both file formats.
#[derive(Debug, Deserialize)]
struct BankFile {
    bank: BankHeader,
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct BankHeader {
    id: String,
    #[serde(alias = "name")]
    title: String,
    #[serde(default, alias = "passMark", alias = "passThreshold")]
    pass_mark: Option<u32>,
}

/// Parse a single bank file, choosing the format from its extension.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let format = BankFormat::from_path(path)
        .with_context(|| format!("unsupported bank file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, format, path)
}

/// Parse bank contents (useful for testing).
pub fn parse_bank_str(content: &str, format: BankFormat, source_path: &Path) -> Result<QuestionBank> {
    let parsed: BankFile = match format {
        BankFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
        BankFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
    };

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(pos, record)| {
            Question::try_from(record).with_context(|| {
                format!(
                    "invalid question #{} in {}",
                    pos + 1,
                    source_path.display()
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut bank = QuestionBank::new(parsed.bank.id, parsed.bank.title, questions)
        .with_context(|| format!("invalid bank: {}", source_path.display()))?;
    if let Some(mark) = parsed.bank.pass_mark {
        bank = bank.with_pass_mark(PassMark::new(mark)?);
    }

    Ok(bank)
}

/// A bank file that could not be loaded.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of loading a directory: good banks and the files that failed.
#[derive(Debug, Default)]
pub struct DirectoryLoad {
    pub banks: Vec<QuestionBank>,
    pub failures: Vec<LoadFailure>,
}

impl DirectoryLoad {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recursively load every `.toml` and `.json` bank under `dir`.
///
/// A malformed file is recorded in [`DirectoryLoad::failures`]; it never stops
/// the remaining banks from loading.
pub fn load_bank_directory(dir: &Path) -> Result<DirectoryLoad> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut load = DirectoryLoad::default();
    load_into(dir, &mut load)?;
    Ok(load)
}

fn load_into(dir: &Path, load: &mut DirectoryLoad) -> Result<()> {
    let mut paths = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();

    for path in paths {
        if path.is_dir() {
            load_into(&path, load)?;
        } else if BankFormat::from_path(&path).is_some() {
            match parse_bank(&path) {
                Ok(bank) => load.banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                    load.failures.push(LoadFailure {
                        path,
                        error: format!("{e:#}"),
                    });
                }
            }
        }
    }

    Ok(())
}

/// A non-fatal authoring warning.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// The question ID (if applicable).
    pub question_id: Option<QuestionId>,
    /// Warning message.
    pub message: String,
}

/// Number of questions at each difficulty, in [`Difficulty::ALL`] order.
/// Questions without a difficulty are not counted.
pub fn difficulty_distribution(bank: &QuestionBank) -> Vec<(Difficulty, usize)> {
    Difficulty::ALL
        .iter()
        .map(|&d| (d, bank.iter().filter(|q| q.difficulty() == Some(d)).count()))
        .collect()
}

/// Check a bank for common authoring smells.
pub fn lint_bank(bank: &QuestionBank) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    // Repeated option text makes two choices indistinguishable
    for q in bank {
        let mut seen = HashSet::new();
        for option in q.options() {
            if !seen.insert(option.trim().to_lowercase()) {
                warnings.push(LintWarning {
                    question_id: Some(q.id().clone()),
                    message: format!("duplicate option text: {}", option.trim()),
                });
            }
        }
    }

    // Same prompt asked twice
    let mut prompts: HashMap<String, &QuestionId> = HashMap::new();
    for q in bank {
        let key = q.prompt().trim().to_lowercase();
        if let Some(first) = prompts.get(&key) {
            warnings.push(LintWarning {
                question_id: Some(q.id().clone()),
                message: format!("same prompt as question {first}"),
            });
        } else {
            prompts.insert(key, q.id());
        }
    }

    // Explanation that only repeats the answer
    for q in bank {
        if q.explanation().trim().eq_ignore_ascii_case(q.correct_option().trim()) {
            warnings.push(LintWarning {
                question_id: Some(q.id().clone()),
                message: "explanation only restates the correct option".into(),
            });
        }
    }

    // Every answer in the same slot is guessable
    if bank.len() >= 4 {
        let first = bank.questions()[0].correct_index();
        if bank.iter().all(|q| q.correct_index() == first) {
            warnings.push(LintWarning {
                question_id: None,
                message: format!(
                    "every correct answer is option {}",
                    first.get() + 1
                ),
            });
        }
    }

    let categorised = bank.iter().filter(|q| q.category().is_some()).count();
    if categorised > 0 && categorised < bank.len() {
        warnings.push(LintWarning {
            question_id: None,
            message: format!(
                "{} of {} questions have no category",
                bank.len() - categorised,
                bank.len()
            ),
        });
    }

    // Difficulty mix is only judged once every question is graded
    if !bank.is_empty() && bank.iter().all(|q| q.difficulty().is_some()) {
        for (difficulty, count) in difficulty_distribution(bank) {
            let share = (count * 100) as f64 / bank.len() as f64;
            let (min, max) = difficulty.recommended_share();
            if share < min || share > max {
                warnings.push(LintWarning {
                    question_id: None,
                    message: format!(
                        "{difficulty} questions are {share:.1}% of the bank (recommended {min:.0}-{max:.0}%)"
                    ),
                });
            }
        }
    }

    warnings
}
