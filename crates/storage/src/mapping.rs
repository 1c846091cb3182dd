//! JSON payload normalization shared by every source.

use quiz_core::model::{ChapterDescriptor, Question};
use serde::Deserialize;

use crate::repository::SourceError;

#[derive(Deserialize)]
struct CatalogPayload {
    chapters: Vec<ChapterDescriptor>,
}

/// Banks come either wrapped as `{"questions": [...]}` or as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum BankPayload {
    Wrapped { questions: Vec<Question> },
    Bare(Vec<Question>),
}

/// Parse a catalog document.
///
/// # Errors
///
/// Returns `SourceError::Parse` if `bytes` is not `{"chapters": [...]}`.
pub fn parse_catalog(locator: &str, bytes: &[u8]) -> Result<Vec<ChapterDescriptor>, SourceError> {
    serde_json::from_slice::<CatalogPayload>(bytes)
        .map(|payload| payload.chapters)
        .map_err(|e| SourceError::parse(locator, e))
}

/// Parse a question bank in either accepted shape.
///
/// # Errors
///
/// Returns `SourceError::Parse` if neither shape matches.
pub fn parse_bank(locator: &str, bytes: &[u8]) -> Result<Vec<Question>, SourceError> {
    let payload: BankPayload = serde_json::from_slice(bytes).map_err(|e| {
        SourceError::parse(locator, format!("expected a question list: {e}"))
    })?;
    Ok(match payload {
        BankPayload::Wrapped { questions } | BankPayload::Bare(questions) => questions,
    })
}

/// Rejects bank locators that would escape the source root.
///
/// # Errors
///
/// Returns `SourceError::Transport` for empty, absolute or parent-relative locators.
pub fn checked_locator(locator: &str) -> Result<&str, SourceError> {
    let trimmed = locator.trim();
    if trimmed.is_empty() {
        return Err(SourceError::transport(locator, "empty locator"));
    }
    if trimmed.starts_with('/')
        || trimmed.starts_with('\\')
        || trimmed.split(['/', '\\']).any(|part| part == "..")
    {
        return Err(SourceError::transport(locator, "locator leaves the data root"));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTION: &str =
        r#"{"question":"2+2?","options":[{"text":"3","isCorrect":false},{"text":"4","isCorrect":true}]}"#;

    #[test]
    fn bank_accepts_wrapped_and_bare_shapes() {
        let wrapped = format!(r#"{{"questions":[{QUESTION}]}}"#);
        let bare = format!("[{QUESTION},{QUESTION}]");

        assert_eq!(parse_bank("w.json", wrapped.as_bytes()).unwrap().len(), 1);
        assert_eq!(parse_bank("b.json", bare.as_bytes()).unwrap().len(), 2);
    }

    #[test]
    fn bank_rejects_other_shapes_with_locator() {
        let err = parse_bank("odd.json", br#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert_eq!(err.locator(), "odd.json");

        assert!(parse_bank("trunc.json", b"[{\"question\":").is_err());
    }

    #[test]
    fn catalog_requires_chapters_field() {
        let ok = br#"{"chapters":[{"id":1,"title":"One","fileName":"one.json"}]}"#;
        let chapters = parse_catalog("chapters.json", ok).unwrap();
        assert_eq!(chapters.len(), 1);
        assert_eq!(chapters[0].source_file, "one.json");

        let err = parse_catalog("chapters.json", b"[]").unwrap_err();
        assert_eq!(err.locator(), "chapters.json");
    }

    #[test]
    fn locator_guard() {
        assert_eq!(checked_locator(" week1.json ").unwrap(), "week1.json");
        assert!(checked_locator("nested/week2.json").is_ok());
        assert!(checked_locator("../secrets.json").is_err());
        assert!(checked_locator("/etc/passwd").is_err());
        assert!(checked_locator("").is_err());
    }
}
