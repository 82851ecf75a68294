//! JSON quiz importer.
//!
//! Parses quiz payloads, builds shuffled sessions from them, and validates
//! them for common authoring mistakes.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;

use crate::error::ImportError;
use crate::model::{Question, QuizOption, RawQuestion, Session};
use crate::shuffle::shuffled;

/// Parse a JSON string into raw questions.
///
/// Fails on invalid syntax, on any entry that does not have exactly the
/// `question`, `keys` and `distractors` fields, on an empty list, and on an
/// entry without keys.
pub fn parse_quiz_str(raw: &str) -> Result<Vec<RawQuestion>, ImportError> {
    let questions: Vec<RawQuestion> = serde_json::from_str(raw)?;

    if questions.is_empty() {
        return Err(ImportError::Empty);
    }

    if let Some(pos) = questions.iter().position(|q| q.keys.is_empty()) {
        return Err(ImportError::NoKeys { entry: pos + 1 });
    }

    Ok(questions)
}

/// Read and parse a quiz file.
pub fn load_quiz_file(path: &Path) -> Result<Vec<RawQuestion>, ImportError> {
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_quiz_str(&content)
}

/// Build a fresh session: keys then distractors per question, options
/// shuffled, then the question order shuffled independently.
pub fn build_session<R: Rng + ?Sized>(raw: Vec<RawQuestion>, rng: &mut R) -> Session {
    let questions = raw
        .into_iter()
        .map(|q| {
            let options = q
                .keys
                .into_iter()
                .map(QuizOption::key)
                .chain(q.distractors.into_iter().map(QuizOption::distractor))
                .collect();
            Question::new(q.question, shuffled(options, rng))
        })
        .collect();

    Session::new(shuffled(questions, rng))
}

/// Parse and build in one step.
pub fn import_quiz<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> Result<Session, ImportError> {
    let questions = parse_quiz_str(raw)?;
    Ok(build_session(questions, rng))
}

/// A warning from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based entry number in the input (if applicable).
    pub entry: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate raw questions for common authoring issues.
pub fn validate_quiz(questions: &[RawQuestion]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_questions = HashSet::new();

    for (i, q) in questions.iter().enumerate() {
        let entry = Some(i + 1);
        let mut warn = |message: String| warnings.push(ValidationWarning { entry, message });

        if q.question.trim().is_empty() {
            warn("question text is empty".into());
        } else if !seen_questions.insert(q.question.trim()) {
            warn(format!("duplicate question: {}", q.question.trim()));
        }

        if q.distractors.is_empty() {
            warn("no distractors; every option is correct".into());
        }

        let mut seen_options = HashSet::new();
        for text in q.keys.iter().chain(&q.distractors) {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                warn("option text is empty".into());
            } else if !seen_options.insert(trimmed) {
                if q.keys.contains(text) && q.distractors.contains(text) {
                    warn(format!("\"{trimmed}\" is both a key and a distractor"));
                } else {
                    warn(format!("duplicate option: {trimmed}"));
                }
            }
        }
    }

    warnings
}
