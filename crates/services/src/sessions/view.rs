use quiz_core::model::Question;
use quiz_core::scoring::ScoreReport;

/// One row of the results review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// One-based question number.
    pub number: usize,
    pub prompt: String,
    /// Text of the chosen option; `None` when unanswered.
    pub user_answer: Option<String>,
    /// Text of the correct option; `None` when the question has none.
    pub correct_answer: Option<String>,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

impl ReviewItem {
    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        self.user_answer.is_none()
    }
}

/// Pair each question with its score for the review screen.
#[must_use]
pub fn build_review(questions: &[Question], report: &ScoreReport) -> Vec<ReviewItem> {
    questions
        .iter()
        .zip(report.per_question())
        .enumerate()
        .map(|(idx, (question, scored))| {
            let text_at =
                |i: usize| question.options.get(i).map(|option| option.text.clone());
            ReviewItem {
                number: idx + 1,
                prompt: question.prompt.clone(),
                user_answer: scored.user_answer.and_then(text_at),
                correct_answer: scored.correct_answer.and_then(text_at),
                is_correct: scored.is_correct,
                explanation: question.review_explanation().map(str::to_owned),
            }
        })
        .collect()
}

/// `MM:SS` countdown display.
#[must_use]
pub fn format_remaining(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Letter shown next to an option: A, B, C, ...
#[must_use]
pub fn option_label(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| char::from(b'A' + i))
}
