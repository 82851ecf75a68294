//! The `quizrun play` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use quizrun_core::config::load_config_from;
use quizrun_core::engine::{IgnoreReason, Outcome, QuizEngine};
use quizrun_core::model::{letter_index, Phase, RawQuestion};
use quizrun_core::parser;
use quizrun_core::report::QuizReport;
use quizrun_core::view::{OptionStatus, QuestionView};
use quizrun_report::html::write_html_report;

const HELP: &str = "\
Commands:
  A / ac / a c / 2   toggle options by letter or 1-based number
  submit             submit the current answer
  next               go to the next question (or the report)
  restart            start over with a fresh shuffle
  quit               leave
";

pub fn execute(
    quiz_path: PathBuf,
    seed: Option<u64>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let format: ReportFormat = format.as_deref().unwrap_or(&config.format).parse()?;
    let sink = ReportSink {
        format,
        output: output.unwrap_or_else(|| config.output_dir.clone()),
    };

    let seed = seed.or(config.seed);
    tracing::debug!(?seed, format = ?sink.format, "starting quiz");
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let questions = parser::load_quiz_file(&quiz_path)?;

    let mut player = Player {
        engine: QuizEngine::new().with_celebrate_threshold(config.celebrate_threshold),
        questions,
        rng,
        sink,
    };
    player.start();

    let stdin = io::stdin();
    let stdout = io::stdout();
    player.run(stdin.lock(), &mut stdout.lock())
}

/// Where a finished report goes besides the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReportFormat {
    Text,
    Json,
    Html,
    All,
}

impl FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            "html" => Ok(ReportFormat::Html),
            "all" => Ok(ReportFormat::All),
            other => anyhow::bail!("unknown report format: '{other}' (text, json, html, all)"),
        }
    }
}

struct ReportSink {
    format: ReportFormat,
    output: PathBuf,
}

impl ReportSink {
    fn save(&self, report: &QuizReport) -> Result<Vec<PathBuf>> {
        let (json, html) = match self.format {
            ReportFormat::Text => (false, false),
            ReportFormat::Json => (true, false),
            ReportFormat::Html => (false, true),
            ReportFormat::All => (true, true),
        };
        if !json && !html {
            return Ok(Vec::new());
        }

        let dir = &self.output;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        let stem = format!(
            "report-{}-{}",
            report.created_at.format("%Y-%m-%dT%H%M%S"),
            &report.id.simple().to_string()[..8]
        );

        let mut written = Vec::new();
        if json {
            let path = self.output.join(format!("{stem}.json"));
            report.save_json(&path)?;
            tracing::info!(path = %path.display(), "json report written");
            written.push(path);
        }
        if html {
            let path = self.output.join(format!("{stem}.html"));
            write_html_report(report, &path)?;
            tracing::info!(path = %path.display(), "html report written");
            written.push(path);
        }
        Ok(written)
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Toggle(Vec<usize>),
    Submit,
    Next,
    Restart,
    Quit,
    Help,
    Empty,
    Unknown(String),
}

impl Command {
    /// Command words win over letters, so `next` never toggles N, E, X, T.
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        match trimmed.to_lowercase().as_str() {
            "submit" => return Command::Submit,
            "next" => return Command::Next,
            "restart" => return Command::Restart,
            "quit" | "exit" => return Command::Quit,
            "help" | "?" => return Command::Help,
            _ => {}
        }

        let mut indices = Vec::new();
        for token in trimmed
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            if token.chars().all(|c| c.is_ascii_digit()) {
                match token.parse::<usize>() {
                    Ok(n) if n >= 1 => indices.push(n - 1),
                    _ => return Command::Unknown(trimmed.to_string()),
                }
            } else if token.chars().all(|c| c.is_ascii_alphabetic()) {
                // each letter toggles on its own; use numbers past Z
                for c in token.chars() {
                    match letter_index(&c.to_string()) {
                        Some(i) => indices.push(i),
                        None => return Command::Unknown(trimmed.to_string()),
                    }
                }
            } else {
                return Command::Unknown(trimmed.to_string());
            }
        }
        Command::Toggle(indices)
    }
}

struct Player<R: Rng> {
    engine: QuizEngine,
    questions: Vec<RawQuestion>,
    rng: R,
    sink: ReportSink,
}

impl<R: Rng> Player<R> {
    /// Build a freshly shuffled session from the loaded questions.
    fn start(&mut self) {
        let session = parser::build_session(self.questions.clone(), &mut self.rng);
        tracing::info!(questions = session.len(), "quiz started");
        self.engine.start(session);
    }

    fn run<I: BufRead, W: Write>(&mut self, input: I, out: &mut W) -> Result<()> {
        writeln!(out, "Type `help` for commands.\n")?;
        self.render(out)?;

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            match Command::parse(&line) {
                Command::Empty => continue,
                Command::Quit => break,
                Command::Help => write!(out, "{HELP}")?,
                Command::Unknown(s) => writeln!(out, "Unknown command: {s} (type `help`)")?,
                Command::Toggle(indices) => {
                    self.toggle_all(&indices, out)?;
                    self.render(out)?;
                }
                Command::Submit => match self.engine.submit() {
                    Outcome::Ignored(reason) => writeln!(out, "! {reason}")?,
                    _ => {
                        self.render(out)?;
                        self.print_verdict(out)?;
                    }
                },
                Command::Next => match self.engine.advance() {
                    Outcome::Ignored(reason) => writeln!(out, "! {reason}")?,
                    Outcome::Applied => self.render(out)?,
                    Outcome::Finished => self.finish(out)?,
                },
                Command::Restart => {
                    self.engine.restart();
                    self.start();
                    writeln!(out, "Restarted with a fresh shuffle.\n")?;
                    self.render(out)?;
                }
            }
        }

        if self.engine.phase() == Phase::Active {
            writeln!(out, "Quiz ended before the last question; no report.")?;
        }
        Ok(())
    }

    /// Toggle every index, or none of them if any is out of range.
    fn toggle_all<W: Write>(&mut self, indices: &[usize], out: &mut W) -> Result<()> {
        if let Some(view) = self.engine.current_view() {
            if let Some(&bad) = indices.iter().find(|&&i| i >= view.options.len()) {
                let reason = IgnoreReason::InvalidIndex(bad);
                writeln!(out, "! {reason}; nothing toggled")?;
                return Ok(());
            }
        }
        for &index in indices {
            if let Outcome::Ignored(reason) = self.engine.toggle_selection(index) {
                writeln!(out, "! {reason}")?;
            }
        }
        Ok(())
    }

    fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(view) = self.engine.current_view() else {
            return Ok(());
        };
        write!(out, "{}", render_question(&view))?;
        Ok(())
    }

    fn print_verdict<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(question) = self.engine.session().and_then(|s| s.current()) else {
            return Ok(());
        };
        let next = self
            .engine
            .current_view()
            .map(|v| v.advance_label())
            .unwrap_or_default();
        if question.is_answered_correctly() {
            writeln!(out, "✔ 回答正确")?;
        } else {
            let correct = question.correct_letters();
            writeln!(out, "✘ 回答错误，正确答案：{correct}")?;
        }
        writeln!(out, "Type `next` to continue ({next}).\n")?;
        Ok(())
    }

    fn finish<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(report) = self.engine.report() else {
            return Ok(());
        };

        writeln!(out, "{}", summary_table(report))?;
        writeln!(out, "{}", report.to_text())?;

        for path in self.sink.save(report)? {
            writeln!(out, "Report saved to: {}", path.display())?;
        }
        writeln!(out, "Type `restart` to go again or `quit` to leave.")?;
        Ok(())
    }
}

fn render_question(view: &QuestionView) -> String {
    const CELLS: usize = 20;
    let progress = view.progress_percent();
    let filled = ((progress / 100.0 * CELLS as f64).round() as usize).min(CELLS);

    let mut s = format!(
        "{}  [{}{}] {:.0}%\n",
        view.counter_label(),
        "█".repeat(filled),
        "░".repeat(CELLS - filled),
        progress
    );
    if view.is_multiple_answer {
        s.push_str("（多选）");
    }
    s.push_str(&view.text);
    s.push('\n');

    for option in &view.options {
        let mark = match option.status {
            OptionStatus::Idle => "[ ]",
            OptionStatus::Selected => "[x]",
            OptionStatus::Correct => " ✔ ",
            OptionStatus::Wrong => " ✘ ",
            OptionStatus::Dimmed => "   ",
        };
        s.push_str(&format!("  {mark} {}. {}\n", option.letter, option.text));
    }
    s.push('\n');
    s
}

pub(crate) fn summary_table(report: &QuizReport) -> comfy_table::Table {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Correct", "Selected", "Result"]);

    let mut outcomes: Vec<_> = report.correct.iter().chain(&report.incorrect).collect();
    outcomes.sort_by_key(|o| o.position);

    for o in outcomes {
        table.add_row(vec![
            Cell::new(o.position),
            Cell::new(&o.question),
            Cell::new(&o.correct_letters),
            Cell::new(if o.selected_letters.is_empty() {
                "-"
            } else {
                o.selected_letters.as_str()
            }),
            Cell::new(if o.is_correct { "✔" } else { "✘" }),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("submit"), Command::Submit);
        assert_eq!(Command::parse("NEXT"), Command::Next);
        assert_eq!(Command::parse("restart"), Command::Restart);
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert_eq!(Command::parse("?"), Command::Help);
    }

    #[test]
    fn parse_toggles() {
        assert_eq!(Command::parse("A"), Command::Toggle(vec![0]));
        assert_eq!(Command::parse("ac"), Command::Toggle(vec![0, 2]));
        assert_eq!(Command::parse("a, c"), Command::Toggle(vec![0, 2]));
        assert_eq!(Command::parse("2 27"), Command::Toggle(vec![1, 26]));
        assert!(matches!(Command::parse("0"), Command::Unknown(_)));
        assert!(matches!(Command::parse("a-b"), Command::Unknown(_)));
    }

    #[test]
    fn parse_formats() {
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert_eq!("ALL".parse::<ReportFormat>().unwrap(), ReportFormat::All);
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    fn player(source: &str, format: ReportFormat, output: &Path) -> Player<StdRng> {
        Player {
            engine: QuizEngine::new(),
            questions: parser::parse_quiz_str(source).unwrap(),
            rng: StdRng::seed_from_u64(1),
            sink: ReportSink {
                format,
                output: output.to_path_buf(),
            },
        }
    }

    fn play(player: &mut Player<StdRng>, input: &str) -> String {
        let mut out = Vec::new();
        player.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn guarded_events_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = player(
            r#"[{"question":"Only","keys":["k"],"distractors":["d"]}]"#,
            ReportFormat::Text,
            dir.path(),
        );
        p.start();
        let out = play(&mut p, "submit\nnext\nF\nquit\n");
        assert!(out.contains("select at least one option first"));
        assert!(out.contains("submit an answer before moving on"));
        assert!(out.contains("no option #6"));
        assert!(out.contains("Quiz ended before the last question"));
    }

    #[test]
    fn finishing_saves_reports() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = player(
            r#"[{"question":"Only","keys":["k"],"distractors":[]}]"#,
            ReportFormat::All,
            dir.path(),
        );
        p.start();
        let out = play(&mut p, "A\nsubmit\nnext\n");
        assert!(out.contains("✔ 回答正确"));
        assert!(out.contains("100%"));
        assert_eq!(out.matches("Report saved to:").count(), 2);

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert!(names.iter().any(|n| n.ends_with(".json")));
        assert!(names.iter().any(|n| n.ends_with(".html")));
    }

    #[test]
    fn render_marks_selection() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = player(
            r#"[{"question":"Pick","keys":["k1","k2"],"distractors":["d"]}]"#,
            ReportFormat::Text,
            dir.path(),
        );
        p.start();
        let view = p.engine.current_view().unwrap();
        let text = render_question(&view);
        assert!(text.starts_with("第 1/1 题"));
        assert!(text.contains("（多选）Pick"));
        assert_eq!(text.matches("[ ]").count(), 3);
    }

    #[test]
    fn mistyped_command_toggles_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = player(
            r#"[{"question":"Pair","keys":["k"],"distractors":["d"]}]"#,
            ReportFormat::Text,
            dir.path(),
        );
        p.start();
        let out = play(&mut p, "sumbit\nnxet\n");
        assert!(out.contains("no option #19; nothing toggled"));
        assert!(out.contains("no option #14; nothing toggled"));

        let question = p.engine.session().unwrap().current().unwrap();
        assert!(question.selected.is_empty());
    }

    #[test]
    fn in_range_letters_all_toggle() {
        let dir = tempfile::tempdir().unwrap();
        let mut p = player(
            r#"[{"question":"Pair","keys":["k"],"distractors":["d"]}]"#,
            ReportFormat::Text,
            dir.path(),
        );
        p.start();
        play(&mut p, "ab\n");
        let question = p.engine.session().unwrap().current().unwrap();
        assert_eq!(question.selected, vec![0, 1]);
    }
}
