use serde::{Deserialize, Serialize};

/// A single answer choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
    /// Why this option is right or wrong.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AnswerOption {
    #[must_use]
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
            reason: None,
        }
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A multiple-choice question as stored in a bank file.
///
/// Options keep their loaded order. Exactly one option is expected to be
/// correct; when several are, the first one wins, and when none is the
/// question can never be answered correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(prompt: impl Into<String>, options: Vec<AnswerOption>) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            explanation: None,
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Index of the first option marked correct.
    #[must_use]
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|option| option.is_correct)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Explanation for the review screen: the correct option's reason,
    /// falling back to the question-level explanation.
    #[must_use]
    pub fn review_explanation(&self) -> Option<&str> {
        self.correct_index()
            .and_then(|idx| self.options[idx].reason.as_deref())
            .filter(|reason| !reason.trim().is_empty())
            .or(self.explanation.as_deref())
    }
}
