//! Data models produced by the listing crawler and the content extractor.
//!
//! - [`ListEntry`]: one article reference discovered on a listing page
//! - [`ArticleRecord`]: the cleaned content of one article, or the reason it
//!   could not be extracted
//!
//! Both are created per invocation and never persisted.

use serde::{Deserialize, Serialize};

/// One discovered article reference.
///
/// `id` is 1-based and assigned in discovery order within a single crawl, so
/// it is only meaningful inside that crawl's result. `url` is the stable
/// identifier across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEntry {
    #[serde(rename = "ID")]
    pub id: usize,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
}

/// The result of extracting one article.
///
/// Failures are carried in `error` rather than raised, so a batch keeps one
/// record per requested URL. `source_url` is always the requested URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub date: String,
    pub content: String,
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleRecord {
    /// An empty record for `url`, to be filled in by the extractor.
    pub fn empty(url: &str) -> Self {
        Self {
            title: String::new(),
            date: String::new(),
            content: String::new(),
            source_url: url.to_string(),
            error: None,
        }
    }

    /// A failed record for `url` carrying a human-readable description.
    pub fn failed(url: &str, error: impl std::fmt::Display) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::empty(url)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The record as a single-line JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
