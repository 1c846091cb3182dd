use serde::Serialize;

use crate::model::Question;

/// Outcome for one question of a submitted quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuestionScore {
    /// `None` when the question was left unanswered.
    pub user_answer: Option<usize>,
    /// `None` when the question has no option marked correct.
    pub correct_answer: Option<usize>,
    pub is_correct: bool,
}

/// Aggregate score for a submitted quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    correct: usize,
    incorrect: usize,
    per_question: Vec<QuestionScore>,
}

impl ScoreReport {
    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Wrong answers plus unanswered questions.
    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.incorrect
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.per_question.len()
    }

    #[must_use]
    pub fn unanswered(&self) -> usize {
        self.per_question
            .iter()
            .filter(|q| q.user_answer.is_none())
            .count()
    }

    #[must_use]
    pub fn per_question(&self) -> &[QuestionScore] {
        &self.per_question
    }

    /// Share of correct answers, rounded to the nearest whole percent.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        // Integer round-half-up of correct * 100 / total.
        let scaled = (self.correct * 200 + total) / (2 * total);
        u32::try_from(scaled).unwrap_or(100)
    }
}

/// Scores `answers` against `questions` position by position.
///
/// A missing entry in `answers` counts as unanswered. A question is correct
/// only when it was answered and the answer equals the first option marked
/// correct; questions without any correct option are always incorrect.
#[must_use]
pub fn score(questions: &[Question], answers: &[Option<usize>]) -> ScoreReport {
    let per_question: Vec<QuestionScore> = questions
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let user_answer = answers.get(idx).copied().flatten();
            let correct_answer = question.correct_index();
            let is_correct = matches!(
                (user_answer, correct_answer),
                (Some(user), Some(expected)) if user == expected
            );
            QuestionScore {
                user_answer,
                correct_answer,
                is_correct,
            }
        })
        .collect();

    let correct = per_question.iter().filter(|q| q.is_correct).count();
    ScoreReport {
        correct,
        incorrect: per_question.len() - correct,
        per_question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;

    fn two_plus_two() -> Question {
        Question::new(
            "2+2?",
            vec![AnswerOption::new("3", false), AnswerOption::new("4", true)],
        )
    }

    #[test]
    fn correct_answer_counts() {
        let report = score(&[two_plus_two()], &[Some(1)]);
        assert_eq!(report.correct(), 1);
        assert_eq!(report.incorrect(), 0);
        assert_eq!(report.total(), 1);
        assert_eq!(report.percentage(), 100);
    }

    #[test]
    fn unanswered_is_incorrect() {
        let report = score(&[two_plus_two()], &[None]);
        assert_eq!(report.correct(), 0);
        let detail = report.per_question()[0];
        assert!(!detail.is_correct);
        assert_eq!(detail.user_answer, None);
        assert_eq!(detail.correct_answer, Some(1));
        assert_eq!(report.unanswered(), 1);
    }

    #[test]
    fn missing_answer_slots_are_unanswered() {
        let report = score(&[two_plus_two(), two_plus_two()], &[Some(1)]);
        assert_eq!(report.correct(), 1);
        assert_eq!(report.incorrect(), 1);
        assert_eq!(report.per_question()[1].user_answer, None);
    }

    #[test]
    fn question_without_correct_option_never_scores() {
        let degenerate = Question::new(
            "?",
            vec![AnswerOption::new("a", false), AnswerOption::new("b", false)],
        );
        let report = score(&[degenerate], &[Some(0)]);
        assert_eq!(report.correct(), 0);
        assert_eq!(report.per_question()[0].correct_answer, None);
        assert!(!report.per_question()[0].is_correct);
    }

    #[test]
    fn scoring_is_deterministic() {
        let questions = vec![two_plus_two(), two_plus_two(), two_plus_two()];
        let answers = vec![Some(1), Some(0), None];
        assert_eq!(score(&questions, &answers), score(&questions, &answers));
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let questions = vec![two_plus_two(), two_plus_two(), two_plus_two()];
        let report = score(&questions, &[Some(1), Some(1), None]);
        assert_eq!(report.percentage(), 67);
        let report = score(&questions, &[Some(1), None, None]);
        assert_eq!(report.percentage(), 33);
        assert_eq!(score(&[], &[]).percentage(), 0);
    }
}
