//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ChapterId;
use storage::SourceError;

/// Errors emitted by the session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("chapter {0} is not in the catalog")]
    UnknownChapter(ChapterId),
    #[error("no questions available for this selection")]
    Empty,
    #[error("the chapter catalog has not been loaded")]
    CatalogNotLoaded,
    #[error("cannot {action}: no quiz is active")]
    NotActive { action: &'static str },
    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },
}

impl SessionError {
    /// True for failures the user can recover from by picking again.
    ///
    /// Everything else is a caller bug (invalid selection or transition).
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SessionError::Source(_) | SessionError::UnknownChapter(_) | SessionError::Empty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_recoverable_errors() {
        let source = SessionError::from(SourceError::Transport {
            locator: "week1.json".into(),
            message: "HTTP 404".into(),
        });
        assert!(source.is_recoverable());
        assert!(source.to_string().contains("week1.json"));
        assert!(SessionError::Empty.is_recoverable());
        assert!(!SessionError::NotActive { action: "next" }.is_recoverable());
        assert!(!SessionError::OptionOutOfRange { index: 4, len: 4 }.is_recoverable());
    }
}
