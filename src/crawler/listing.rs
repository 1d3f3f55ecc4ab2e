//! Listing page crawler
//!
//! Loads a news-listing page in one session, lets an infinite-scroll feed grow
//! in proportion to the requested window, then keeps the article links whose
//! publication time falls inside the window.

use crate::config::Config;
use crate::extract::{LinkCandidate, LinkExtractor, Timestamp};
use crate::models::ListEntry;
use crate::provider::{DocumentProvider, Session, WaitCondition};
use crate::url::ArticleUrlPattern;
use crate::{ProviderResult, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Hours of listing history one scroll round is assumed to reveal
const HOURS_PER_SCROLL: u32 = 12;

/// Discovers recent article links on a listing page
pub struct ListCrawler {
    provider: Arc<dyn DocumentProvider>,
    article_path: String,
    page_load_timeout: Duration,
    ready_timeout: Duration,
    settle: Duration,
}

impl ListCrawler {
    /// Creates a crawler using the listing and provider sections of `config`
    pub fn new(provider: Arc<dyn DocumentProvider>, config: &Config) -> Self {
        Self {
            provider,
            article_path: config.listing.article_path.clone(),
            page_load_timeout: config.provider.page_load_timeout(),
            ready_timeout: config.listing.ready_timeout(),
            settle: config.listing.settle(),
        }
    }

    /// Overrides the ready wait and the post-scroll settle delay
    pub fn with_timings(mut self, ready_timeout: Duration, settle: Duration) -> Self {
        self.ready_timeout = ready_timeout;
        self.settle = settle;
        self
    }

    /// Crawls `base_url` for articles published in the last `hours_window` hours
    ///
    /// # Returns
    ///
    /// * `Ok(entries)` - Entries with ids `1..=N` in document order; empty if
    ///   the page failed to load or never showed an article link
    /// * `Err(NewsError)` - The URL is unusable or no session could be opened
    pub async fn crawl(&self, base_url: &str, hours_window: u32) -> Result<Vec<ListEntry>> {
        self.crawl_at(base_url, hours_window, Utc::now()).await
    }

    /// Like [`ListCrawler::crawl`], with the window measured back from `now`
    pub async fn crawl_at(
        &self,
        base_url: &str,
        hours_window: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<ListEntry>> {
        let base = Url::parse(base_url)?;
        let pattern = ArticleUrlPattern::for_listing(&base, &self.article_path)?;
        let extractor = LinkExtractor::new(pattern.clone())?;
        let ready = WaitCondition::article_link(base.clone(), pattern)?;

        tracing::info!("Crawling {} for the last {} hours", base, hours_window);

        let mut session = self.provider.open_session().await?;
        let loaded = self
            .load_candidates(session.as_mut(), &base, &ready, &extractor, hours_window)
            .await;
        session.close().await;

        let candidates = match loaded {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Listing crawl of {} failed: {}", base, e);
                return Ok(Vec::new());
            }
        };

        let found = candidates.len();
        let cutoff = window_cutoff(now, hours_window);
        let entries = assign_ids(apply_window(candidates, cutoff));

        tracing::info!(
            "Found {} article links, {} inside the {} hour window",
            found,
            entries.len(),
            hours_window
        );
        Ok(entries)
    }

    /// Loads the page, grows the feed and scans it for article links
    async fn load_candidates(
        &self,
        session: &mut dyn Session,
        base: &Url,
        ready: &WaitCondition,
        extractor: &LinkExtractor,
        hours_window: u32,
    ) -> ProviderResult<Vec<LinkCandidate>> {
        session.open(base.as_str(), self.page_load_timeout).await?;

        if !session.wait_for(ready, self.ready_timeout).await? {
            tracing::warn!(
                "No article links appeared on {} within {:?}",
                base,
                self.ready_timeout
            );
            return Ok(Vec::new());
        }

        let rounds = hours_window / HOURS_PER_SCROLL + 1;
        let mut last_height = session.current_height().await?;
        for round in 1..=rounds {
            session.scroll_to_bottom().await?;
            tokio::time::sleep(self.settle).await;

            let height = session.current_height().await?;
            tracing::debug!(round, height, "Scrolled listing");
            if height == last_height {
                break;
            }
            last_height = height;
        }

        let source = session.page_source().await?;
        Ok(extractor.extract(&source, base))
    }
}

/// Start of the window ending at `now`
///
/// Windows reaching past the earliest representable instant start there.
pub fn window_cutoff(now: DateTime<Utc>, hours_window: u32) -> DateTime<Utc> {
    chrono::Duration::try_hours(i64::from(hours_window))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Drops candidates with an exact timestamp strictly older than `cutoff`
///
/// Candidates with an unparsed, relative or missing timestamp are kept.
pub fn apply_window(candidates: Vec<LinkCandidate>, cutoff: DateTime<Utc>) -> Vec<LinkCandidate> {
    candidates
        .into_iter()
        .filter(|candidate| match &candidate.timestamp {
            Some(Timestamp::Exact(published)) => {
                let keep = *published >= cutoff;
                if !keep {
                    tracing::trace!(url = %candidate.url, %published, "Outside window");
                }
                keep
            }
            _ => true,
        })
        .collect()
}

/// Numbers candidates from 1 in their current order
pub fn assign_ids(candidates: Vec<LinkCandidate>) -> Vec<ListEntry> {
    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| ListEntry {
            id: index + 1,
            title: candidate.title,
            url: candidate.url,
        })
        .collect()
}
