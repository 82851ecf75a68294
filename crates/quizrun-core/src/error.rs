//! Import error types.
//!
//! Importing is the only fallible step of a quiz session. Every other
//! engine event is total and reports dropped input through
//! [`Outcome`](crate::engine::Outcome) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while importing a quiz.
///
/// Any of these aborts the whole import; no partial quiz is committed.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The input is not valid JSON or does not match the expected shape.
    #[error("invalid quiz JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is a well-formed but empty list.
    #[error("quiz contains no questions")]
    Empty,

    /// An entry has an empty `keys` list (1-based entry number).
    #[error("question #{entry} has no keys; every question needs at least one correct answer")]
    NoKeys { entry: usize },

    /// The quiz file could not be read.
    #[error("failed to read quiz file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
