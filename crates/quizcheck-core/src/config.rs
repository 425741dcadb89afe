//! quizcheck configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::score::PassMark;

/// How answer options are labelled when shown to a learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionLabels {
    /// A, B, C, ...
    #[default]
    Letters,
    /// 1, 2, 3, ...
    Numbers,
}

impl OptionLabels {
    /// Label for the option at zero-based `index`.
    pub fn label(self, index: usize) -> String {
        match self {
            OptionLabels::Letters => {
                if index < 26 {
                    char::from(b'A' + index as u8).to_string()
                } else {
                    (index + 1).to_string()
                }
            }
            OptionLabels::Numbers => (index + 1).to_string(),
        }
    }

    /// Parse a learner-typed label back to a zero-based index.
    ///
    /// Numbers are accepted under either scheme; letters are case-insensitive.
    /// Range is not checked here.
    pub fn parse(self, input: &str) -> Option<usize> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1);
        }
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
            }
            _ => None,
        }
    }
}

/// Top-level quizcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizcheckConfig {
    /// Pass mark for banks that do not set their own.
    #[serde(default)]
    pub pass_mark: PassMark,
    /// Directory searched for question banks.
    #[serde(default = "default_banks_dir")]
    pub banks_dir: PathBuf,
    /// Show the running score while a quiz is in progress.
    #[serde(default = "default_true")]
    pub show_partial_score: bool,
    /// Labelling scheme for answer options.
    #[serde(default)]
    pub option_labels: OptionLabels,
}

fn default_banks_dir() -> PathBuf {
    PathBuf::from("banks")
}

fn default_true() -> bool {
    true
}

impl Default for QuizcheckConfig {
    fn default() -> Self {
        Self {
            pass_mark: PassMark::default(),
            banks_dir: default_banks_dir(),
            show_partial_score: true,
            option_labels: OptionLabels::default(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizcheck.toml` in the current directory
/// 2. `~/.config/quizcheck/config.toml`
///
/// Environment variable override: `QUIZCHECK_PASS_MARK`.
pub fn load_config() -> Result<QuizcheckConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizcheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizcheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizcheckConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizcheckConfig::default(),
    };

    if let Ok(raw) = std::env::var("QUIZCHECK_PASS_MARK") {
        let percent: u32 = raw
            .trim()
            .parse()
            .with_context(|| format!("QUIZCHECK_PASS_MARK is not a number: {raw}"))?;
        config.pass_mark = PassMark::new(percent)?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizcheck"))
}
