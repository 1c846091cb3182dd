use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{Question, SessionId, SessionMode};

use crate::error::SessionError;

/// One quiz attempt: a fixed snapshot of questions, the cursor, and the
/// answer chosen for each position.
///
/// The question list never changes after construction. A question is
/// identified by its position here, so `answers[i]` always refers to
/// `questions[i]`.
#[derive(Clone)]
pub struct SessionState {
    id: SessionId,
    mode: SessionMode,
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
    started_at: DateTime<Utc>,
}

impl SessionState {
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `questions` is empty.
    pub fn new(
        id: SessionId,
        mode: SessionMode,
        questions: Vec<Question>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            id,
            mode,
            questions,
            current: 0,
            answers,
            started_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn unanswered_count(&self) -> usize {
        self.total() - self.answered_count()
    }

    /// Record (or overwrite) the answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OptionOutOfRange` if `option` is not an index
    /// into the current question's options.
    pub fn record_answer(&mut self, option: usize) -> Result<(), SessionError> {
        let len = self.current_question().option_count();
        if option >= len {
            return Err(SessionError::OptionOutOfRange { index: option, len });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Step back one question. Returns false at the first question.
    pub fn go_previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Step forward one question. Returns false at the last question.
    pub fn go_next(&mut self) -> bool {
        if self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        true
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("answered", &self.answered_count())
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::AnswerOption;
    use quiz_core::time::fixed_now;

    fn question(prompt: &str) -> Question {
        Question::new(
            prompt,
            vec![
                AnswerOption::new("a", false),
                AnswerOption::new("b", true),
                AnswerOption::new("c", false),
            ],
        )
    }

    fn build_state(n: usize) -> SessionState {
        let questions = (0..n).map(|i| question(&format!("Q{i}"))).collect();
        SessionState::new(
            SessionId::new_v4(),
            SessionMode::AllChapters,
            questions,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn empty_session_returns_error() {
        let err = SessionState::new(
            SessionId::new_v4(),
            SessionMode::AllChapters,
            Vec::new(),
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn starts_at_first_question_all_unanswered() {
        let state = build_state(3);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.answers(), &[None, None, None]);
        assert_eq!(state.unanswered_count(), 3);
    }

    #[test]
    fn navigation_is_bounded() {
        let mut state = build_state(2);
        assert!(!state.go_previous());
        assert_eq!(state.current_index(), 0);

        assert!(state.go_next());
        assert_eq!(state.current_index(), 1);
        assert!(!state.go_next());
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn answers_overwrite_and_persist_across_navigation() {
        let mut state = build_state(2);
        state.record_answer(0).unwrap();
        state.record_answer(2).unwrap();
        assert_eq!(state.current_answer(), Some(2));

        state.go_next();
        assert_eq!(state.current_answer(), None);
        state.go_previous();
        assert_eq!(state.current_answer(), Some(2));
        assert_eq!(state.answered_count(), 1);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut state = build_state(1);
        let err = state.record_answer(3).unwrap_err();
        assert_eq!(err, SessionError::OptionOutOfRange { index: 3, len: 3 });
        assert_eq!(state.current_answer(), None);
    }
}
