//! Quiz state machine.
//!
//! `QuizEngine` owns the session and moves it through
//! `Importing -> Active -> Reported`. Events are total: dropped input is
//! reported through [`Outcome`] rather than an error.

use std::fmt;

use rand::Rng;

use crate::error::ImportError;
use crate::model::{Phase, Session};
use crate::parser;
use crate::report::{QuizReport, DEFAULT_CELEBRATE_THRESHOLD};
use crate::view::QuestionView;

/// What an event did to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed.
    Applied,
    /// The last question was left and the report is ready.
    Finished,
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}

/// Why an event was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No active quiz (still importing, or already reported).
    NotActive,
    /// The current question has already been submitted.
    AlreadySubmitted,
    /// Submit with nothing selected.
    EmptySelection,
    /// Option index past the end of the option list.
    InvalidIndex(usize),
    /// Advance before the current question was submitted.
    NotSubmitted,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NotActive => write!(f, "no quiz in progress"),
            IgnoreReason::AlreadySubmitted => write!(f, "answer already submitted"),
            IgnoreReason::EmptySelection => write!(f, "select at least one option first"),
            IgnoreReason::InvalidIndex(i) => write!(f, "no option #{}", i + 1),
            IgnoreReason::NotSubmitted => write!(f, "submit an answer before moving on"),
        }
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Importing,
    Active(Session),
    Reported {
        session: Session,
        report: QuizReport,
    },
}

/// The quiz engine. One per running quiz front end.
#[derive(Debug)]
pub struct QuizEngine {
    state: State,
    celebrate_threshold: u32,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizEngine {
    pub fn new() -> Self {
        Self {
            state: State::Importing,
            celebrate_threshold: DEFAULT_CELEBRATE_THRESHOLD,
        }
    }

    /// Percentage above which the report headline celebrates.
    pub fn with_celebrate_threshold(mut self, threshold: u32) -> Self {
        self.celebrate_threshold = threshold;
        self
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Importing => Phase::Importing,
            State::Active(_) => Phase::Active,
            State::Reported { .. } => Phase::Reported,
        }
    }

    /// The current session, if one has been imported.
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            State::Importing => None,
            State::Active(session) | State::Reported { session, .. } => Some(session),
        }
    }

    /// Parse `raw`, build a shuffled session and start it.
    ///
    /// Replaces any existing session. On error the engine is untouched.
    pub fn import<R: Rng + ?Sized>(
        &mut self,
        raw: &str,
        rng: &mut R,
    ) -> Result<usize, ImportError> {
        let session = parser::import_quiz(raw, rng)?;
        let count = session.len();
        self.start(session);
        tracing::info!(questions = count, "quiz imported");
        Ok(count)
    }

    /// Start an already-built session.
    pub fn start(&mut self, session: Session) {
        self.state = if session.is_empty() {
            State::Importing
        } else {
            State::Active(session)
        };
    }

    /// Flip membership of option `index` in the current selection.
    pub fn toggle_selection(&mut self, index: usize) -> Outcome {
        let outcome = match self.active_mut() {
            None => Outcome::Ignored(IgnoreReason::NotActive),
            Some(session) => match session.current_mut() {
                None => Outcome::Ignored(IgnoreReason::NotActive),
                Some(q) if q.is_submitted => Outcome::Ignored(IgnoreReason::AlreadySubmitted),
                Some(q) if index >= q.options.len() => {
                    Outcome::Ignored(IgnoreReason::InvalidIndex(index))
                }
                Some(q) => {
                    match q.selected.iter().position(|&i| i == index) {
                        Some(pos) => {
                            q.selected.remove(pos);
                        }
                        None => q.selected.push(index),
                    }
                    Outcome::Applied
                }
            },
        };
        trace_ignored("toggle", outcome);
        outcome
    }

    /// Submit the current selection and score it.
    pub fn submit(&mut self) -> Outcome {
        let outcome = match self.active_mut() {
            None => Outcome::Ignored(IgnoreReason::NotActive),
            Some(session) => {
                let position = session.current_index + 1;
                match session.questions.get_mut(session.current_index) {
                    None => Outcome::Ignored(IgnoreReason::NotActive),
                    Some(q) if q.is_submitted => Outcome::Ignored(IgnoreReason::AlreadySubmitted),
                    Some(q) if q.selected.is_empty() => {
                        Outcome::Ignored(IgnoreReason::EmptySelection)
                    }
                    Some(q) => {
                        q.is_submitted = true;
                        let correct = q.is_answered_correctly();
                        if correct {
                            session.score += 1;
                        }
                        tracing::debug!(
                            position,
                            correct,
                            score = session.score,
                            "answer submitted"
                        );
                        Outcome::Applied
                    }
                }
            }
        };
        trace_ignored("submit", outcome);
        outcome
    }

    /// Move to the next question, or to the report after the last one.
    pub fn advance(&mut self) -> Outcome {
        let outcome = match self.active_mut() {
            None => Outcome::Ignored(IgnoreReason::NotActive),
            Some(session) => {
                let submitted = session.current().is_some_and(|q| q.is_submitted);
                if !submitted {
                    Outcome::Ignored(IgnoreReason::NotSubmitted)
                } else if !session.is_last() {
                    session.current_index += 1;
                    Outcome::Applied
                } else {
                    Outcome::Finished
                }
            }
        };

        if outcome == Outcome::Finished {
            if let State::Active(session) = std::mem::take(&mut self.state) {
                tracing::info!(
                    score = session.score,
                    total = session.len(),
                    "quiz finished"
                );
                let report = QuizReport::from_session(&session, self.celebrate_threshold);
                self.state = State::Reported { session, report };
            }
        }

        trace_ignored("advance", outcome);
        outcome
    }

    /// Drop the session and go back to importing.
    pub fn restart(&mut self) {
        tracing::debug!(from = %self.phase(), "session restarted");
        self.state = State::Importing;
    }

    /// Renderable fields of the current question.
    pub fn current_view(&self) -> Option<QuestionView> {
        match &self.state {
            State::Active(session) => QuestionView::of_current(session),
            _ => None,
        }
    }

    /// The final report, built when the last question is left.
    pub fn report(&self) -> Option<&QuizReport> {
        match &self.state {
            State::Reported { report, .. } => Some(report),
            _ => None,
        }
    }

    fn active_mut(&mut self) -> Option<&mut Session> {
        match &mut self.state {
            State::Active(s) => Some(s),
            _ => None,
        }
    }
}

fn trace_ignored(event: &str, outcome: Outcome) {
    if let Outcome::Ignored(reason) = outcome {
        tracing::debug!(event, %reason, "event ignored");
    }
}
