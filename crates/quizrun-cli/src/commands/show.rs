//! The `quizrun show` command.

use std::path::PathBuf;

use anyhow::Result;

use quizrun_core::report::QuizReport;
use quizrun_report::html::write_html_report;

use super::play::summary_table;

pub fn execute(report_path: PathBuf, html: Option<PathBuf>) -> Result<()> {
    let report = QuizReport::load_json(&report_path)?;

    println!(
        "Report {} ({})",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", summary_table(&report));
    println!("{}", report.to_text());

    if let Some(path) = html {
        write_html_report(&report, &path)?;
        println!("HTML report written to: {}", path.display());
    }

    Ok(())
}
