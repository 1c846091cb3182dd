use quiz_core::scoring::ScoreReport;
use services::ReviewItem;

use super::html::sanitize_html;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewStatus {
    Correct,
    Incorrect,
    Unanswered,
}

impl ReviewStatus {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            ReviewStatus::Correct => "correct",
            ReviewStatus::Incorrect => "incorrect",
            ReviewStatus::Unanswered => "unanswered",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ReviewStatus::Correct => "✓ Correct",
            ReviewStatus::Incorrect => "✗ Incorrect",
            ReviewStatus::Unanswered => "✗ Not answered",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub status: ReviewStatus,
    pub prompt_html: String,
    /// `None` when the question was skipped.
    pub your_answer_html: Option<String>,
    /// Only shown when the answer was not correct.
    pub correct_answer_html: Option<String>,
    pub explanation_html: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub score_label: String,
    pub percentage_label: String,
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub total: usize,
    pub rows: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_results(report: &ScoreReport, review: &[ReviewItem]) -> ResultsVm {
    let rows = review
        .iter()
        .map(|item| {
            let status = if item.is_correct {
                ReviewStatus::Correct
            } else if item.is_unanswered() {
                ReviewStatus::Unanswered
            } else {
                ReviewStatus::Incorrect
            };
            ReviewRowVm {
                number: item.number,
                status,
                prompt_html: sanitize_html(&item.prompt),
                your_answer_html: item.user_answer.as_deref().map(sanitize_html),
                correct_answer_html: if item.is_correct {
                    None
                } else {
                    item.correct_answer.as_deref().map(sanitize_html)
                },
                explanation_html: item
                    .explanation
                    .as_deref()
                    .filter(|text| !text.trim().is_empty())
                    .map(sanitize_html),
            }
        })
        .collect();

    ResultsVm {
        score_label: format!("{}/{}", report.correct(), report.total()),
        percentage_label: format!("{}%", report.percentage()),
        correct: report.correct(),
        incorrect: report.incorrect(),
        unanswered: report.unanswered(),
        total: report.total(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOption, Question};
    use quiz_core::scoring::score;
    use services::sessions::build_review;

    fn questions() -> Vec<Question> {
        let q = |prompt: &str| {
            Question::new(
                prompt,
                vec![
                    AnswerOption::new("heap", false),
                    AnswerOption::new("stack", true).with_reason("fixed size at compile time"),
                ],
            )
        };
        vec![q("Where do arrays live?"), q("Where do i32s live?"), q("And tuples?")]
    }

    #[test]
    fn maps_each_review_status() {
        let questions = questions();
        let report = score(&questions, &[Some(1), Some(0), None]);
        let review = build_review(&questions, &report);
        let vm = map_results(&report, &review);

        assert_eq!(vm.score_label, "1/3");
        assert_eq!(vm.percentage_label, "33%");
        assert_eq!((vm.correct, vm.incorrect, vm.unanswered, vm.total), (1, 2, 1, 3));

        assert_eq!(vm.rows[0].status, ReviewStatus::Correct);
        assert_eq!(vm.rows[0].correct_answer_html, None);
        assert_eq!(vm.rows[1].status, ReviewStatus::Incorrect);
        assert_eq!(vm.rows[1].your_answer_html.as_deref(), Some("heap"));
        assert_eq!(vm.rows[1].correct_answer_html.as_deref(), Some("stack"));
        assert_eq!(vm.rows[2].status, ReviewStatus::Unanswered);
        assert_eq!(vm.rows[2].your_answer_html, None);
        assert!(
            vm.rows
                .iter()
                .all(|row| row.explanation_html.as_deref() == Some("fixed size at compile time"))
        );
    }
}
