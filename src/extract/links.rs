//! Article link discovery
//!
//! Scans a listing document for anchors that point at articles and, for each,
//! works out a display title and a publication timestamp from the markup
//! around it.
//!
//! # Timestamp chain
//!
//! | Step | Scope | Looks for |
//! |------|-------|-----------|
//! | 1 | nearest container ancestor | `time[datetime]` |
//! | 2 | nearest container ancestor | class containing `time` or `date` |
//! | 3 | the container's siblings | steps 1 and 2 again |
//! | 4 | nearest container ancestor | "N hours ago" style phrases |
//!
//! # Title chain
//!
//! Anchor visible text, then a title-like descendant, then the anchor's raw
//! text content, then `"Article <last path segment>"`.

use super::matcher::Matcher;
use super::text::{raw_text, visible_text};
use crate::provider::parse_selector;
use crate::url::{last_path_segment, resolve_link, ArticleUrlPattern};
use crate::ExtractError;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Tags that count as the structural container around a link
const CONTAINER_TAGS: &[&str] = &["div", "li", "article", "section"];

/// Naive datetime layouts accepted after RFC 3339 fails; read as UTC
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

const RECENCY_PATTERN: &str = r"(?i)\d+\s+(minute|hour|day|week)s?\s+ago|today at";

/// Publication time associated with a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// Machine-readable instant
    Exact(DateTime<Utc>),

    /// A time element was found but carried no parseable attribute
    Unparsed(String),

    /// A natural-language recency phrase; detected, never resolved
    Recency(String),
}

/// One article link found on the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: String,
    pub title: String,
    pub timestamp: Option<Timestamp>,
}

/// Where a timestamp step looks, relative to the link's container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Container,
    Siblings,
}

/// Link extractor for one listing site
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    pattern: ArticleUrlPattern,
    anchors: Selector,
    timestamp_steps: Vec<(Scope, Matcher)>,
    title_like: Matcher,
}

impl LinkExtractor {
    pub fn new(pattern: ArticleUrlPattern) -> Result<Self, ExtractError> {
        let time_element = Matcher::css("time[datetime]")?;
        let time_class = Matcher::class_contains(&["time", "date"]);
        let recency = Regex::new(RECENCY_PATTERN).map_err(|e| ExtractError::Selector {
            selector: RECENCY_PATTERN.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            pattern,
            anchors: parse_selector("a[href]")?,
            timestamp_steps: vec![
                (Scope::Container, time_element.clone()),
                (Scope::Container, time_class.clone()),
                (Scope::Siblings, time_element),
                (Scope::Siblings, time_class),
                (Scope::Container, Matcher::TextPattern(recency)),
            ],
            title_like: Matcher::css(r#"[class*="title"], h1, h2, h3, h4"#)?,
        })
    }

    /// Extracts every article link in document order
    ///
    /// Duplicate links are kept; the page's own structure decides uniqueness.
    pub fn extract(&self, source: &str, base_url: &Url) -> Vec<LinkCandidate> {
        let document = Html::parse_document(source);
        let mut candidates = Vec::new();

        for anchor in document.select(&self.anchors) {
            match self.inspect_anchor(anchor, base_url) {
                Some(candidate) => candidates.push(candidate),
                None => {
                    tracing::trace!(href = ?anchor.value().attr("href"), "Skipping non-article link");
                }
            }
        }

        tracing::debug!(count = candidates.len(), "Extracted article links");
        candidates
    }

    /// Builds a candidate from one anchor, or None if it is not an article link
    fn inspect_anchor(&self, anchor: ElementRef, base_url: &Url) -> Option<LinkCandidate> {
        let href = anchor.value().attr("href")?;
        let url = resolve_link(href, base_url)?;
        if !self.pattern.matches(url.as_str()) {
            return None;
        }

        let timestamp = self.resolve_timestamp(anchor, url.as_str());
        let title = self.resolve_title(anchor, &url);

        Some(LinkCandidate {
            url: url.to_string(),
            title,
            timestamp,
        })
    }

    fn resolve_timestamp(&self, anchor: ElementRef, url: &str) -> Option<Timestamp> {
        let container = container_of(anchor)?;

        for (scope, matcher) in &self.timestamp_steps {
            let found = match scope {
                Scope::Container => matcher.find(container),
                Scope::Siblings => siblings_of(container)
                    .into_iter()
                    .find_map(|sibling| matcher.find_inclusive(sibling)),
            };

            if let Some(element) = found {
                return Some(match matcher {
                    Matcher::TextPattern(pattern) => {
                        let text = visible_text(element);
                        let phrase = pattern
                            .find(&text)
                            .map(|m| m.as_str().to_string())
                            .unwrap_or_default();
                        Timestamp::Recency(phrase)
                    }
                    _ => timestamp_from_element(element, url),
                });
            }
        }

        None
    }

    fn resolve_title(&self, anchor: ElementRef, url: &Url) -> String {
        let text = visible_text(anchor);
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }

        if let Some(element) = self.title_like.find(anchor) {
            let text = visible_text(element);
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }

        let raw = raw_text(anchor);
        let raw = raw.trim();
        if !raw.is_empty() {
            return raw.to_string();
        }

        format!("Article {}", last_path_segment(url))
    }
}

/// Nearest ancestor that is a structural container
fn container_of(anchor: ElementRef) -> Option<ElementRef> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|element| CONTAINER_TAGS.contains(&element.value().name()))
}

/// The container's parent's other element children
fn siblings_of(container: ElementRef) -> Vec<ElementRef> {
    let Some(parent) = container.parent() else {
        return Vec::new();
    };

    parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| sibling.id() != container.id())
        .collect()
}

fn timestamp_from_element(element: ElementRef, url: &str) -> Timestamp {
    let text = visible_text(element).trim().to_string();

    match element.value().attr("datetime") {
        Some(value) => match parse_datetime(value) {
            Some(instant) => Timestamp::Exact(instant),
            None => {
                tracing::warn!(%url, datetime = value, "Unparseable datetime attribute");
                Timestamp::Unparsed(text)
            }
        },
        None => {
            tracing::debug!(%url, text = %text, "Time element without datetime attribute");
            Timestamp::Unparsed(text)
        }
    }
}

/// Parses an ISO-8601 datetime attribute into UTC
///
/// Offsets are honoured; values without an offset are taken as UTC.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}
