//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::Result;
use std::path::Path;

use quizrun_core::model::option_letter;
use quizrun_core::report::{QuestionOutcome, QuizReport, PERFECT_SCORE_MESSAGE};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a quiz report.
pub fn generate_html(report: &QuizReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let percentage = report.percentage;
    html.push_str(&format!("<title>quizrun report — {percentage}%</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    let emoji = report.headline_emoji();
    html.push_str(&format!("<div class=\"emoji\">{emoji}</div>\n"));
    html.push_str(&format!("<div class=\"percentage\">{percentage}%</div>\n"));
    html.push_str(&format!(
        "<p class=\"meta\">{} | {}</p>\n",
        html_escape(&report.score_line()),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&generate_score_bar(report.percentage));
    html.push_str("</header>\n");

    // Per-question results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\">\n");
    html.push_str("<thead><tr><th>#</th><th>Question</th>");
    html.push_str("<th>Correct</th><th>Selected</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    let mut outcomes: Vec<&QuestionOutcome> =
        report.correct.iter().chain(&report.incorrect).collect();
    outcomes.sort_by_key(|o| o.position);

    for o in outcomes {
        let class = if o.is_correct { "pass" } else { "fail" };
        let selected = if o.selected_letters.is_empty() {
            "-".to_string()
        } else {
            html_escape(&o.selected_letters)
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            o.position,
            html_escape(&o.question),
            option_list(&o.options),
            html_escape(&o.correct_letters),
            selected
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Review prompt
    html.push_str("<section class=\"review\">\n");
    match &report.review_prompt {
        Some(prompt) => {
            let title = html_escape(&report.prompt_title());
            html.push_str(&format!("<h2>{title}</h2>\n"));
            html.push_str("<textarea id=\"prompt\" readonly rows=\"16\" ");
            html.push_str("onclick=\"this.select()\">");
            html.push_str(&html_escape(prompt));
            html.push_str("</textarea>\n");
            html.push_str("<button onclick=\"copyPrompt()\">复制</button>\n");
        }
        None => {
            html.push_str(&format!(
                "<p class=\"perfect\">{}</p>\n",
                html_escape(PERFECT_SCORE_MESSAGE)
            ));
        }
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    let raw = serde_json::to_string_pretty(report).unwrap_or_default();
    html.push_str(&html_escape(&raw));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &QuizReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn option_list(options: &[String]) -> String {
    let mut list = String::from("<ol class=\"options\">");
    for (i, text) in options.iter().enumerate() {
        let letter = option_letter(i);
        let text = html_escape(text);
        list.push_str(&format!("<li><b>{letter}.</b> {text}</li>"));
    }
    list.push_str("</ol>");
    list
}

fn generate_score_bar(percentage: u32) -> String {
    let max_width = 400;
    let height = 16;
    let width = percentage.min(100) as usize * max_width / 100;

    let color = if percentage >= 80 {
        "#22c55e"
    } else if percentage >= 50 {
        "#eab308"
    } else {
        "#ef4444"
    };

    format!(
        "<svg width=\"{max_width}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n  \
         <rect x=\"0\" y=\"0\" width=\"{max_width}\" height=\"{height}\" fill=\"var(--border)\" rx=\"8\"/>\n  \
         <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{color}\" rx=\"8\"/>\n</svg>\n"
    )
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
header { text-align: center; }
.emoji { font-size: 3rem; }
.percentage { font-size: 2.5rem; font-weight: bold; }
.meta { color: #6b7280; }
h2 { margin-top: 2rem; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; vertical-align: top; }
th { background: var(--border); }
.options { margin: 0.5rem 0 0; padding-left: 0; list-style: none; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
textarea { width: 100%; font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
.perfect { font-size: 1.25rem; text-align: center; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
"#;

const JS: &str = r#"
function copyPrompt() {
  const area = document.getElementById('prompt');
  if (!area) return;
  area.select();
  if (navigator.clipboard) {
    navigator.clipboard.writeText(area.value);
  } else {
    document.execCommand('copy');
  }
}
"#;
