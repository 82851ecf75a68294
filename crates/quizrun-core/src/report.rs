//! Quiz report with review prompt generation and JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{option_letter, Question, Session};

/// Percentage above which the headline celebrates.
pub const DEFAULT_CELEBRATE_THRESHOLD: u32 = 70;

/// Placeholder for an empty selection in the review prompt.
pub const NO_SELECTION: &str = "None";

/// Shown instead of the review prompt when nothing was wrong.
pub const PERFECT_SCORE_MESSAGE: &str = "满分！本次没有需要复盘的错题。";

const PROMPT_HEADER: &str = "工作流程：
1. 针对每一道错题：
  1.1. 评估题目质量（无歧义性、区分度）：1~5分。
  1.2. 解释为什么我的答案不对，正确答案又为什么正确。
2. 最后总结我在这组题目中暴露出的核心知识盲区。
";

/// A finished quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub total: usize,
    pub score: u32,
    /// `score / total` as a whole percentage, rounded half up.
    pub percentage: u32,
    pub celebrate_threshold: u32,
    /// Correctly answered questions, in session order.
    pub correct: Vec<QuestionOutcome>,
    /// Incorrectly answered questions, in session order.
    pub incorrect: Vec<QuestionOutcome>,
    /// Review prompt for the incorrect questions; `None` on a perfect score.
    pub review_prompt: Option<String>,
}

/// How a single question went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the session.
    pub position: usize,
    pub question: String,
    /// Option texts in display order.
    pub options: Vec<String>,
    pub correct_letters: String,
    /// Selected letters in pick order; empty if nothing was selected.
    pub selected_letters: String,
    pub is_correct: bool,
}

impl QuestionOutcome {
    fn of(position: usize, question: &Question) -> Self {
        Self {
            position,
            question: question.text.clone(),
            options: question.options.iter().map(|o| o.text.clone()).collect(),
            correct_letters: question.correct_letters(),
            selected_letters: question.selected_letters(),
            is_correct: question.is_answered_correctly(),
        }
    }
}

impl QuizReport {
    /// Build the report for a session.
    pub fn from_session(session: &Session, celebrate_threshold: u32) -> Self {
        let outcomes: Vec<QuestionOutcome> = session
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuestionOutcome::of(i + 1, q))
            .collect();

        let wrong: Vec<&Question> = session
            .questions
            .iter()
            .zip(&outcomes)
            .filter(|(_, o)| !o.is_correct)
            .map(|(q, _)| q)
            .collect();
        let review_prompt = (!wrong.is_empty()).then(|| generate_review_prompt(&wrong));

        let (correct, incorrect): (Vec<_>, Vec<_>) =
            outcomes.into_iter().partition(|o| o.is_correct);

        let percentage = percentage(session.score, session.len());
        tracing::info!(
            score = session.score,
            total = session.len(),
            percentage,
            incorrect = incorrect.len(),
            "report generated"
        );

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            total: session.len(),
            score: session.score,
            percentage,
            celebrate_threshold,
            correct,
            incorrect,
            review_prompt,
        }
    }

    /// No incorrect questions.
    pub fn is_perfect(&self) -> bool {
        self.incorrect.is_empty()
    }

    pub fn headline_emoji(&self) -> &'static str {
        if self.percentage > self.celebrate_threshold {
            "🎉"
        } else {
            "💡"
        }
    }

    /// e.g. `正确：3 / 5`
    pub fn score_line(&self) -> String {
        format!("正确：{} / {}", self.score, self.total)
    }

    /// e.g. `整合AI提示词 (2 个错误)`
    pub fn prompt_title(&self) -> String {
        format!("整合AI提示词 ({} 个错误)", self.incorrect.len())
    }

    /// Plain-text rendering for terminals.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {}%\n", self.headline_emoji(), self.percentage));
        out.push_str(&self.score_line());
        out.push('\n');

        match &self.review_prompt {
            Some(prompt) => {
                out.push('\n');
                out.push_str(&self.prompt_title());
                out.push_str("\n\n");
                out.push_str(prompt);
                out.push('\n');
            }
            None => {
                out.push_str(PERFECT_SCORE_MESSAGE);
                out.push('\n');
            }
        }

        out
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}

/// `round(score / total * 100)`, half up, in integer arithmetic.
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let total = total as u64;
    ((u64::from(score) * 200 + total) / (2 * total)) as u32
}

/// Render the review prompt for a list of incorrectly answered questions.
///
/// Blocks are numbered from 1 in the order given.
pub fn generate_review_prompt(questions: &[&Question]) -> String {
    let body = questions
        .iter()
        .enumerate()
        .map(|(n, q)| {
            let options = q
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| format!("{}. {}", option_letter(i), o.text))
                .collect::<Vec<_>>()
                .join("\n");

            let selected = if q.selected.is_empty() {
                NO_SELECTION.to_string()
            } else {
                q.selected_letters()
            };

            format!(
                "【题目 #{}】 {}\n{}\n\n【正确答案】{}；【我的选择】{}。\n---",
                n + 1,
                q.text,
                options,
                q.correct_letters(),
                selected
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{PROMPT_HEADER}{body}")
}
