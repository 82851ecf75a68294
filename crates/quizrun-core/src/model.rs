//! Core data model types for quizrun.
//!
//! These are the types the importer produces and the engine mutates:
//! raw input questions, shuffled options, questions with selection state,
//! and the session that ties them together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the import payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawQuestion {
    /// The question text.
    pub question: String,
    /// Correct answers.
    pub keys: Vec<String>,
    /// Incorrect answers.
    pub distractors: Vec<String>,
}

impl RawQuestion {
    /// Total number of options this entry produces.
    pub fn option_count(&self) -> usize {
        self.keys.len() + self.distractors.len()
    }
}

/// A single selectable choice, derived from a key or a distractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    pub text: String,
    pub is_correct: bool,
}

impl QuizOption {
    pub fn key(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: true,
        }
    }

    pub fn distractor(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_correct: false,
        }
    }
}

/// A question as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub text: String,
    /// Options in display order (fixed after import).
    pub options: Vec<QuizOption>,
    /// Selected option indices, in the order they were picked.
    #[serde(default)]
    pub selected: Vec<usize>,
    /// Whether the answer has been submitted.
    #[serde(default)]
    pub is_submitted: bool,
}

impl Question {
    pub fn new(text: impl Into<String>, options: Vec<QuizOption>) -> Self {
        Self {
            text: text.into(),
            options,
            selected: Vec::new(),
            is_submitted: false,
        }
    }

    /// Indices of the correct options, ascending.
    pub fn correct_indices(&self) -> Vec<usize> {
        self.options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_correct)
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether the current selection equals the set of correct options.
    ///
    /// Order is ignored; cardinality and membership must both match.
    pub fn is_answered_correctly(&self) -> bool {
        let correct = self.correct_indices();
        self.selected.len() == correct.len() && self.selected.iter().all(|i| correct.contains(i))
    }

    /// Whether more than one option is correct.
    pub fn is_multiple_answer(&self) -> bool {
        self.options.iter().filter(|o| o.is_correct).count() > 1
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Letters of the correct options, concatenated in display order.
    pub fn correct_letters(&self) -> String {
        self.correct_indices()
            .into_iter()
            .map(option_letter)
            .collect()
    }

    /// Letters of the selected options, concatenated in selection order.
    pub fn selected_letters(&self) -> String {
        self.selected.iter().copied().map(option_letter).collect()
    }
}

/// The in-memory record of quiz progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// Index of the question on screen.
    pub current_index: usize,
    /// Number of questions judged correct at submit time.
    pub score: u32,
}

impl Session {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_mut(&mut self) -> Option<&mut Question> {
        self.questions.get_mut(self.current_index)
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }
}

/// Session-level lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Importing,
    Active,
    Reported,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Importing => write!(f, "importing"),
            Phase::Active => write!(f, "active"),
            Phase::Reported => write!(f, "reported"),
        }
    }
}

/// Display letter for an option index: `A`..`Z`, then `AA`, `AB`, ...
pub fn option_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inverse of [`option_letter`] for input parsing. Case-insensitive.
pub fn letter_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut n = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        n = n.checked_mul(26)?.checked_add(digit)?;
    }
    Some(n - 1)
}
