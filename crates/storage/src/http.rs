use std::time::Duration;

use async_trait::async_trait;
use quiz_core::model::{ChapterDescriptor, Question};
use reqwest::Client;

use crate::mapping::{checked_locator, parse_bank, parse_catalog};
use crate::repository::{CATALOG_LOCATOR, QuestionSource, SourceError};

/// Fetches the static-site layout over HTTP:
/// `<base>/chapters.json` and `<base>/data/<bank file>`.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// # Errors
    ///
    /// Returns `SourceError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| SourceError::transport(base_url, e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch(&self, locator: &str, url: String) -> Result<Vec<u8>, SourceError> {
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(%url, error = %e, "request failed");
            SourceError::transport(locator, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, %status, "unexpected status");
            return Err(SourceError::transport(locator, format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::transport(locator, e))?;
        Ok(bytes.to_vec())
    }
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    async fn load_catalog(&self) -> Result<Vec<ChapterDescriptor>, SourceError> {
        let bytes = self
            .fetch(CATALOG_LOCATOR, self.url_for(CATALOG_LOCATOR))
            .await?;
        let chapters = parse_catalog(CATALOG_LOCATOR, &bytes)?;
        tracing::debug!(chapters = chapters.len(), base = %self.base_url, "loaded catalog");
        Ok(chapters)
    }

    async fn load_bank(&self, locator: &str) -> Result<Vec<Question>, SourceError> {
        let relative = checked_locator(locator)?;
        let bytes = self
            .fetch(locator, self.url_for(&format!("data/{relative}")))
            .await?;
        let questions = parse_bank(locator, &bytes)?;
        tracing::debug!(locator, questions = questions.len(), "loaded bank");
        Ok(questions)
    }
}
