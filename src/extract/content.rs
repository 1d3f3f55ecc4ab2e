//! Article content extraction
//!
//! Turns one article page into an [`ArticleRecord`]: a title, a publication
//! date and the body text with page furniture (bylines, share widgets, ads,
//! related links) left out.

use super::matcher::{FieldSource, MatcherChain};
use super::text::block_text;
use crate::config::Config;
use crate::models::ArticleRecord;
use crate::provider::{parse_selector, Session, WaitCondition};
use crate::ExtractError;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};

const CONTAINER: &str = "article";

const TITLE_CHAIN: &[&str] = &["article h1", "h1.article-title", "h1"];

const DATE_CHAIN: &[&str] = &[
    "article time[datetime]",
    "article .date",
    "article .published-date",
    "article .post-date",
    "time[datetime]",
];

/// Subtrees never included in the body text
const NOISE: &[&str] = &[
    "script",
    "style",
    "h1",
    "time",
    ".date",
    ".published-date",
    ".post-date",
    ".ad",
    ".advertisement",
    ".related-articles",
    ".comments",
    ".social-share",
    ".author-info",
    "nav",
];

/// Extracts article records from pages loaded through a [`Session`]
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    container: Selector,
    ready: WaitCondition,
    title: MatcherChain,
    date: MatcherChain,
    noise: MatcherChain,
    page_load_timeout: Duration,
    container_timeout: Duration,
}

impl ContentExtractor {
    /// Creates an extractor with default timeouts (20 s load, 5 s container wait)
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            container: parse_selector(CONTAINER)?,
            ready: WaitCondition::element(CONTAINER)?,
            title: MatcherChain::from_css(TITLE_CHAIN)?,
            date: MatcherChain::from_css(DATE_CHAIN)?,
            noise: MatcherChain::from_css(NOISE)?,
            page_load_timeout: Duration::from_secs(20),
            container_timeout: Duration::from_secs(5),
        })
    }

    /// Creates an extractor using the configured timeouts
    pub fn from_config(config: &Config) -> Result<Self, ExtractError> {
        Ok(Self::new()?.with_timeouts(
            config.provider.page_load_timeout(),
            config.extraction.container_timeout(),
        ))
    }

    pub fn with_timeouts(mut self, page_load: Duration, container: Duration) -> Self {
        self.page_load_timeout = page_load;
        self.container_timeout = container;
        self
    }

    /// Loads `url` in `session` and extracts it
    ///
    /// Never fails: load and read errors become a record with the `error`
    /// slot set. A page where the container never shows up is still parsed,
    /// which yields a record with empty content.
    pub async fn extract(&self, session: &mut dyn Session, url: &str) -> ArticleRecord {
        debug!(%url, "Extracting article");

        if let Err(e) = session.open(url, self.page_load_timeout).await {
            warn!(%url, "Failed to load article: {}", e);
            return ArticleRecord::failed(url, e);
        }

        match session.wait_for(&self.ready, self.container_timeout).await {
            Ok(true) => {}
            Ok(false) => debug!(%url, "Article container did not appear in time"),
            Err(e) => {
                warn!(%url, "Failed while waiting for article container: {}", e);
                return ArticleRecord::failed(url, e);
            }
        }

        match session.page_source().await {
            Ok(source) => self.parse(&source, url),
            Err(e) => {
                warn!(%url, "Failed to read article document: {}", e);
                ArticleRecord::failed(url, e)
            }
        }
    }

    /// Extracts a record from an already loaded document
    pub fn parse(&self, source: &str, url: &str) -> ArticleRecord {
        let document = Html::parse_document(source);
        let root = document.root_element();
        let mut record = ArticleRecord::empty(url);

        if let Some(heading) = self.title.first_match(root) {
            record.title = FieldSource::Text.read(heading);
        }

        if let Some(date) = self.date.first_match(root) {
            record.date = FieldSource::AttrOrText("datetime").read(date);
        }

        match document.select(&self.container).next() {
            Some(container) => {
                record.content = block_text(container, |element| self.noise.matches_any(element));
            }
            None => debug!(%url, "No article container; content left empty"),
        }

        record
    }
}
