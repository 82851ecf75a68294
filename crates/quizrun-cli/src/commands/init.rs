//! The `quizrun init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizrun.toml").exists() {
        println!("quizrun.toml already exists, skipping.");
    } else {
        std::fs::write("quizrun.toml", SAMPLE_CONFIG)?;
        println!("Created quizrun.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.json");
    if example_path.exists() {
        println!("quizzes/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizzes/example.json or add your own quiz");
    println!("  2. Run: quizrun validate --quiz quizzes/example.json");
    println!("  3. Run: quizrun play --quiz quizzes/example.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

# Fixed shuffle seed; remove for a new order every run.
# seed = 42

# Percentage above which the report celebrates.
celebrate_threshold = 70

# Saved reports: text (console only), json, html, all
format = "text"
output_dir = "./quizrun-reports"
"#;

const EXAMPLE_QUIZ: &str = r#"[
  {
    "question": "Which of these are Rust smart pointers?",
    "keys": ["Box<T>", "Rc<T>"],
    "distractors": ["&T", "usize"]
  },
  {
    "question": "Which keyword declares a mutable binding?",
    "keys": ["let mut"],
    "distractors": ["var", "mut let", "let ref"]
  },
  {
    "question": "What does the ? operator do on an Err value?",
    "keys": ["Returns early with the error, converted via From"],
    "distractors": ["Panics", "Ignores the error", "Retries the expression"]
  }
]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_quiz_is_importable() {
        let questions = quizrun_core::parser::parse_quiz_str(EXAMPLE_QUIZ).unwrap();
        assert_eq!(questions.len(), 3);
        assert!(quizrun_core::parser::validate_quiz(&questions).is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config = quizrun_core::config::parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.format, "text");
    }
}
