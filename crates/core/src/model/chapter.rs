use serde::{Deserialize, Serialize};

use crate::model::ids::ChapterId;

/// One entry of the chapter catalog.
///
/// Immutable once loaded. `source_file` locates the chapter's question bank;
/// catalogs name it either `fileName` or `sourceFile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDescriptor {
    pub id: ChapterId,
    pub title: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub question_count: u32,
    #[serde(rename = "fileName", alias = "sourceFile")]
    pub source_file: String,
    /// Short badge shown on the chapter card (e.g. "Week 3").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
}

/// Which question pool a session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionMode {
    Chapter(ChapterId),
    AllChapters,
}

impl SessionMode {
    /// Parses the selection token used by the chapter picker: `all` or a chapter id.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }
        if token.eq_ignore_ascii_case("all") {
            return Some(Self::AllChapters);
        }
        Some(Self::Chapter(ChapterId::new(token)))
    }
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionMode::Chapter(id) => write!(f, "chapter:{id}"),
            SessionMode::AllChapters => f.write_str("all"),
        }
    }
}
