//! quizcheck CLI — take, check, and score question banks from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizcheck",
    version,
    about = "Single-answer quiz engine for course question banks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Path to a .toml or .json question bank
        #[arg(long)]
        bank: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Answer a single question as an inline check
    Check {
        /// Path to a .toml or .json question bank
        #[arg(long)]
        bank: PathBuf,

        /// Question id within the bank
        #[arg(long)]
        question: String,

        /// Option label (e.g. "B" or "2")
        #[arg(long)]
        answer: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a full set of answers without prompting
    Score {
        /// Path to a .toml or .json question bank
        #[arg(long)]
        bank: PathBuf,

        /// Answers as "id=label" pairs (e.g. "1=A,2=C,3=B")
        #[arg(long)]
        answers: String,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Exit code 1 if the attempt is below the pass mark
        #[arg(long)]
        fail_below_pass: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank files
    Validate {
        /// Path to bank file or directory (default: banks_dir from config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizcheck=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { bank, config } => commands::take::execute(bank, config),
        Commands::Check {
            bank,
            question,
            answer,
            config,
        } => commands::check::execute(bank, question, answer, config),
        Commands::Score {
            bank,
            answers,
            format,
            fail_below_pass,
            config,
        } => commands::score::execute(bank, answers, format, fail_below_pass, config),
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
