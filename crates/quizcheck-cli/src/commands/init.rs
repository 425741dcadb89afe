//! The `quizcheck init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizcheck.toml
    if std::path::Path::new("quizcheck.toml").exists() {
        println!("quizcheck.toml already exists, skipping.");
    } else {
        std::fs::write("quizcheck.toml", SAMPLE_CONFIG)?;
        println!("Created quizcheck.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml or add your own banks");
    println!("  2. Run: quizcheck validate --bank banks");
    println!("  3. Run: quizcheck take --bank banks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizcheck configuration

# Minimum percentage to pass, for banks without their own pass_mark
pass_mark = 80

# Where `quizcheck validate` looks by default
banks_dir = "banks"

# Show the running score while a quiz is in progress
show_partial_score = true

# Option labels: "letters" (A, B, C) or "numbers" (1, 2, 3)
option_labels = "letters"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
title = "Example Knowledge Check"

[[questions]]
id = 1
prompt = "What is the first step before working on an electrical circuit?"
options = [
    "Start work if the lights are off",
    "Safely isolate the supply and prove it dead",
    "Ask a colleague whether it is live",
]
correct_index = 1
explanation = "A circuit is only safe to work on once it has been isolated, locked off, and proved dead with an approved voltage indicator."

[[questions]]
id = 2
prompt = "Which control measure sits at the bottom of the hierarchy of control?"
options = ["Elimination", "Engineering controls", "Personal protective equipment"]
correct_index = 2
explanation = "PPE is the last resort: it only protects the wearer, and only while it is worn correctly."
"#;
