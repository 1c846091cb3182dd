use async_trait::async_trait;
use quiz_core::model::{ChapterDescriptor, Question};
use std::path::{Path, PathBuf};

use crate::mapping::{checked_locator, parse_bank, parse_catalog};
use crate::repository::{CATALOG_LOCATOR, QuestionSource, SourceError};

/// Reads the static-site layout from disk:
/// `<root>/chapters.json` and `<root>/data/<bank file>`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, locator: &str, path: PathBuf) -> Result<Vec<u8>, SourceError> {
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read quiz data");
                Err(SourceError::transport(locator, e))
            }
        }
    }
}

#[async_trait]
impl QuestionSource for FsSource {
    async fn load_catalog(&self) -> Result<Vec<ChapterDescriptor>, SourceError> {
        let bytes = self
            .read(CATALOG_LOCATOR, self.root.join(CATALOG_LOCATOR))
            .await?;
        let chapters = parse_catalog(CATALOG_LOCATOR, &bytes)?;
        tracing::debug!(chapters = chapters.len(), root = %self.root.display(), "loaded catalog");
        Ok(chapters)
    }

    async fn load_bank(&self, locator: &str) -> Result<Vec<Question>, SourceError> {
        let relative = checked_locator(locator)?;
        let bytes = self.read(locator, self.root.join("data").join(relative)).await?;
        let questions = parse_bank(locator, &bytes)?;
        tracing::debug!(locator, questions = questions.len(), "loaded bank");
        Ok(questions)
    }
}
