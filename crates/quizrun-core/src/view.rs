//! Render-ready view of the current question.
//!
//! Front ends draw from these types and never touch the session directly.

use serde::Serialize;

use crate::model::{option_letter, Question, Session};

const NEXT_LABEL: &str = "下一题 →";
const FINISH_LABEL: &str = "查看结果";

/// How an option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionStatus {
    /// Not submitted, not selected.
    Idle,
    /// Not submitted, selected.
    Selected,
    /// Submitted, a correct option (picked or not).
    Correct,
    /// Submitted, picked but wrong.
    Wrong,
    /// Submitted, neither correct nor picked.
    Dimmed,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub index: usize,
    pub letter: String,
    pub text: String,
    pub is_correct: bool,
    pub is_selected: bool,
    pub status: OptionStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    /// 1-based position in the session.
    pub position: usize,
    pub total: usize,
    pub text: String,
    pub options: Vec<OptionView>,
    pub is_submitted: bool,
    pub is_last: bool,
    pub is_multiple_answer: bool,
}

impl QuestionView {
    /// View of the question at `session.current_index`.
    pub fn of_current(session: &Session) -> Option<Self> {
        let question = session.current()?;
        Some(Self::build(question, session.current_index + 1, session.len()))
    }

    fn build(question: &Question, position: usize, total: usize) -> Self {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let is_selected = question.is_selected(index);
                let status = match (question.is_submitted, option.is_correct, is_selected) {
                    (false, _, false) => OptionStatus::Idle,
                    (false, _, true) => OptionStatus::Selected,
                    (true, true, _) => OptionStatus::Correct,
                    (true, false, true) => OptionStatus::Wrong,
                    (true, false, false) => OptionStatus::Dimmed,
                };
                OptionView {
                    index,
                    letter: option_letter(index),
                    text: option.text.clone(),
                    is_correct: option.is_correct,
                    is_selected,
                    status,
                }
            })
            .collect();

        Self {
            position,
            total,
            text: question.text.clone(),
            options,
            is_submitted: question.is_submitted,
            is_last: position == total,
            is_multiple_answer: question.is_multiple_answer(),
        }
    }

    /// e.g. `第 2/10 题`
    pub fn counter_label(&self) -> String {
        format!("第 {}/{} 题", self.position, self.total)
    }

    /// Progress through the quiz, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64 * 100.0
    }

    /// Label for the advance action.
    pub fn advance_label(&self) -> &'static str {
        if self.is_last { FINISH_LABEL } else { NEXT_LABEL }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizOption;

    fn session(selected: Vec<usize>, submitted: bool) -> Session {
        let mut q = Question::new(
            "Pick the vowels",
            vec![
                QuizOption::key("a"),
                QuizOption::distractor("b"),
                QuizOption::key("e"),
                QuizOption::distractor("c"),
            ],
        );
        q.selected = selected;
        q.is_submitted = submitted;
        let mut s = Session::new(vec![q, Question::new("next", vec![QuizOption::key("x")])]);
        s.current_index = 0;
        s
    }

    fn statuses(view: &QuestionView) -> Vec<OptionStatus> {
        view.options.iter().map(|o| o.status).collect()
    }

    #[test]
    fn before_submit() {
        let view = QuestionView::of_current(&session(vec![1], false)).unwrap();
        assert_eq!(
            statuses(&view),
            vec![
                OptionStatus::Idle,
                OptionStatus::Selected,
                OptionStatus::Idle,
                OptionStatus::Idle,
            ]
        );
        assert!(!view.is_submitted);
        assert!(view.is_multiple_answer);
        assert_eq!(view.options[2].letter, "C");
    }

    #[test]
    fn after_submit() {
        let view = QuestionView::of_current(&session(vec![0, 1], true)).unwrap();
        assert_eq!(
            statuses(&view),
            vec![
                OptionStatus::Correct,
                OptionStatus::Wrong,
                OptionStatus::Correct,
                OptionStatus::Dimmed,
            ]
        );
    }

    #[test]
    fn labels_and_progress() {
        let mut s = session(vec![], false);
        let view = QuestionView::of_current(&s).unwrap();
        assert_eq!(view.counter_label(), "第 1/2 题");
        assert_eq!(view.advance_label(), "下一题 →");
        assert!((view.progress_percent() - 50.0).abs() < f64::EPSILON);

        s.current_index = 1;
        let view = QuestionView::of_current(&s).unwrap();
        assert!(view.is_last);
        assert_eq!(view.advance_label(), "查看结果");
        assert!(!view.is_multiple_answer);
    }

    #[test]
    fn no_view_past_end() {
        let mut s = session(vec![], false);
        s.current_index = 5;
        assert!(QuestionView::of_current(&s).is_none());
    }
}
