use quiz_core::model::Question;
use services::sessions::option_label;

use super::html::sanitize_html;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: char,
    pub text_html: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// Zero-based position in the quiz.
    pub index: usize,
    pub total: usize,
    pub heading: String,
    pub prompt_html: String,
    pub options: Vec<OptionVm>,
    pub can_go_previous: bool,
    /// On the last question Submit replaces Next.
    pub is_last: bool,
}

#[must_use]
pub fn map_question(
    question: &Question,
    index: usize,
    total: usize,
    prior_answer: Option<usize>,
) -> QuestionVm {
    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| OptionVm {
            index: i,
            label: option_label(i),
            text_html: sanitize_html(&option.text),
            selected: prior_answer == Some(i),
        })
        .collect();

    QuestionVm {
        index,
        total,
        heading: format!("Question {} of {total}", index + 1),
        prompt_html: sanitize_html(&question.prompt),
        options,
        can_go_previous: index > 0,
        is_last: index + 1 >= total,
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressVm {
    pub index: usize,
    pub total: usize,
}

impl ProgressVm {
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {}", (self.index + 1).min(self.total), self.total)
    }

    /// Width of the progress bar fill, 0..=100.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (self.index + 1).min(self.total) * 100 / self.total
    }
}
