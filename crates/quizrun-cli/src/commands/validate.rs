//! The `quizrun validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizrun_core::parser;

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let questions = parser::load_quiz_file(&quiz_path)?;
    let option_count: usize = questions.iter().map(|q| q.option_count()).sum();

    println!(
        "Quiz: {} ({} questions, {} options)",
        quiz_path.display(),
        questions.len(),
        option_count
    );

    let warnings = parser::validate_quiz(&questions);
    for w in &warnings {
        let prefix = w
            .entry
            .map(|n| format!("  [#{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Quiz file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
