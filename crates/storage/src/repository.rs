use async_trait::async_trait;
use quiz_core::model::{ChapterDescriptor, Question};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::fs::FsSource;
use crate::http::HttpSource;

/// Locator of the chapter catalog relative to a source root.
pub const CATALOG_LOCATOR: &str = "chapters.json";

/// A catalog or bank could not be obtained.
///
/// Both variants are recoverable: the caller returns the user to chapter
/// selection and shows the message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    #[error("could not fetch {locator}: {message}")]
    Transport { locator: String, message: String },

    #[error("{locator} is missing or malformed: {message}")]
    Parse { locator: String, message: String },
}

impl SourceError {
    pub(crate) fn transport(locator: &str, message: impl ToString) -> Self {
        Self::Transport {
            locator: locator.to_owned(),
            message: message.to_string(),
        }
    }

    pub(crate) fn parse(locator: &str, message: impl ToString) -> Self {
        Self::Parse {
            locator: locator.to_owned(),
            message: message.to_string(),
        }
    }

    /// The catalog or bank locator that failed.
    #[must_use]
    pub fn locator(&self) -> &str {
        match self {
            SourceError::Transport { locator, .. } | SourceError::Parse { locator, .. } => locator,
        }
    }
}

/// Where chapter catalogs and question banks come from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and parse the chapter catalog.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the catalog cannot be fetched or parsed.
    async fn load_catalog(&self) -> Result<Vec<ChapterDescriptor>, SourceError>;

    /// Fetch and parse one question bank.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` carrying `locator` on transport or parse failure.
    async fn load_bank(&self, locator: &str) -> Result<Vec<Question>, SourceError>;

    /// Load every chapter's bank and concatenate them in catalog order.
    ///
    /// # Errors
    ///
    /// Fails with the first bank error; no partial pool is returned.
    async fn load_all_banks(
        &self,
        chapters: &[ChapterDescriptor],
    ) -> Result<Vec<Question>, SourceError> {
        let mut all = Vec::new();
        for chapter in chapters {
            let bank = self.load_bank(&chapter.source_file).await?;
            all.extend(bank);
        }
        Ok(all)
    }
}

#[derive(Default)]
struct InMemoryState {
    catalog: Vec<ChapterDescriptor>,
    banks: HashMap<String, Vec<Question>>,
    failing: HashSet<String>,
    catalog_fails: bool,
    bank_loads: usize,
}

/// In-memory source for tests, demos and embedding.
#[derive(Clone, Default)]
pub struct InMemorySource {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a chapter and its bank, keyed by the chapter's `source_file`.
    #[must_use]
    pub fn with_chapter(self, chapter: ChapterDescriptor, questions: Vec<Question>) -> Self {
        if let Ok(mut guard) = self.state.lock() {
            guard.banks.insert(chapter.source_file.clone(), questions);
            guard.catalog.push(chapter);
        }
        self
    }

    /// Makes every load of `locator` fail with a transport error.
    pub fn fail_locator(&self, locator: impl Into<String>) {
        if let Ok(mut guard) = self.state.lock() {
            guard.failing.insert(locator.into());
        }
    }

    pub fn fail_catalog(&self, fail: bool) {
        if let Ok(mut guard) = self.state.lock() {
            guard.catalog_fails = fail;
        }
    }

    /// Number of bank loads attempted so far.
    #[must_use]
    pub fn bank_loads(&self) -> usize {
        self.state.lock().map(|g| g.bank_loads).unwrap_or(0)
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn load_catalog(&self) -> Result<Vec<ChapterDescriptor>, SourceError> {
        let guard = self
            .state
            .lock()
            .map_err(|e| SourceError::transport(CATALOG_LOCATOR, e))?;
        if guard.catalog_fails {
            return Err(SourceError::transport(CATALOG_LOCATOR, "unavailable"));
        }
        Ok(guard.catalog.clone())
    }

    async fn load_bank(&self, locator: &str) -> Result<Vec<Question>, SourceError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| SourceError::transport(locator, e))?;
        guard.bank_loads += 1;
        if guard.failing.contains(locator) {
            return Err(SourceError::transport(locator, "unavailable"));
        }
        guard
            .banks
            .get(locator)
            .cloned()
            .ok_or_else(|| SourceError::transport(locator, "not found"))
    }
}

/// Configured origin of quiz data, resolved into a concrete source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    /// A directory with `chapters.json` and a `data/` folder of banks.
    Directory(PathBuf),
    /// A base URL serving the same layout.
    Remote(String),
}

impl SourceLocation {
    /// Build the source for this location.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Transport` if the HTTP client cannot be built.
    pub fn open(&self) -> Result<Arc<dyn QuestionSource>, SourceError> {
        match self {
            SourceLocation::Directory(root) => Ok(Arc::new(FsSource::new(root.clone()))),
            SourceLocation::Remote(base) => Ok(Arc::new(HttpSource::new(base)?)),
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLocation::Directory(root) => write!(f, "{}", root.display()),
            SourceLocation::Remote(base) => f.write_str(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOption, ChapterId};

    fn chapter(id: &str, file: &str) -> ChapterDescriptor {
        ChapterDescriptor {
            id: ChapterId::new(id),
            title: format!("Chapter {id}"),
            instructor: String::new(),
            date: String::new(),
            description: String::new(),
            question_count: 2,
            source_file: file.into(),
            week: None,
        }
    }

    fn bank(prefix: &str) -> Vec<Question> {
        (0..2)
            .map(|i| {
                Question::new(
                    format!("{prefix}{i}"),
                    vec![AnswerOption::new("yes", true), AnswerOption::new("no", false)],
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn load_all_banks_concatenates_in_catalog_order() {
        let source = InMemorySource::new()
            .with_chapter(chapter("1", "a.json"), bank("a"))
            .with_chapter(chapter("2", "b.json"), bank("b"));
        let catalog = source.load_catalog().await.unwrap();

        let all = source.load_all_banks(&catalog).await.unwrap();
        let prompts: Vec<_> = all.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["a0", "a1", "b0", "b1"]);
    }

    #[tokio::test]
    async fn load_all_banks_fails_on_first_broken_bank() {
        let source = InMemorySource::new()
            .with_chapter(chapter("1", "a.json"), bank("a"))
            .with_chapter(chapter("2", "b.json"), bank("b"))
            .with_chapter(chapter("3", "c.json"), bank("c"));
        source.fail_locator("b.json");
        let catalog = source.load_catalog().await.unwrap();

        let err = source.load_all_banks(&catalog).await.unwrap_err();
        assert_eq!(err.locator(), "b.json");
        assert_eq!(source.bank_loads(), 2);
    }

    #[tokio::test]
    async fn unknown_locator_is_transport_error() {
        let source = InMemorySource::new();
        let err = source.load_bank("missing.json").await.unwrap_err();
        assert!(matches!(err, SourceError::Transport { .. }));
    }

    #[tokio::test]
    async fn catalog_failure_reports_catalog_locator() {
        let source = InMemorySource::new();
        source.fail_catalog(true);
        let err = source.load_catalog().await.unwrap_err();
        assert_eq!(err.locator(), CATALOG_LOCATOR);
    }
}
