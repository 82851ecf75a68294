//! quizrun-report — Report file generation.
//!
//! Renders a finished [`QuizReport`](quizrun_core::report::QuizReport) into
//! a self-contained HTML page. JSON output lives on the report type itself.

pub mod html;

pub use html::{generate_html, write_html_report};
