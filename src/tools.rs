//! String-in, string-out operations for tool integrations
//!
//! [`NewsTools`] wraps a provider and a configuration and exposes the three
//! operations an assistant or RPC layer needs, each returning JSON text.

use crate::config::Config;
use crate::crawler::{ExtractionCoordinator, ListCrawler};
use crate::output::{render_list, ListEnvelope};
use crate::provider::{build_provider, DocumentProvider};
use crate::{NewsError, Result};
use std::sync::Arc;

pub struct NewsTools {
    provider: Arc<dyn DocumentProvider>,
    config: Config,
}

impl NewsTools {
    pub fn new(provider: Arc<dyn DocumentProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    /// Builds the provider named in `config`
    pub fn from_config(config: Config) -> Result<Self> {
        let provider = build_provider(&config.provider)?;
        Ok(Self::new(provider, config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn envelope(&self) -> ListEnvelope {
        ListEnvelope::from_legacy_flag(self.config.listing.legacy_envelope)
    }

    /// Recent entries from the configured listing page as a JSON document
    ///
    /// `hours_window` defaults to the configured window.
    pub async fn list_recent_entries(&self, hours_window: Option<u32>) -> Result<String> {
        let hours = hours_window.unwrap_or(self.config.listing.hours_window);
        let crawler = ListCrawler::new(Arc::clone(&self.provider), &self.config);
        let entries = crawler.crawl(&self.config.listing.url, hours).await?;

        let envelope = self.envelope();
        if envelope == ListEnvelope::Legacy {
            tracing::warn!("Rendering the legacy brace-wrapped list; it is not valid JSON");
        }
        Ok(render_list(&entries, envelope)?)
    }

    /// One article as a JSON object
    pub async fn extract_content(&self, url: &str) -> Result<String> {
        let coordinator = ExtractionCoordinator::new(Arc::clone(&self.provider), &self.config)?;
        let record = coordinator.extract_one(url).await?;
        Ok(record.to_json()?)
    }

    /// Several articles, one JSON object each, in completion order
    pub async fn extract_content_batch(&self, urls: &[String]) -> Result<Vec<String>> {
        let coordinator = ExtractionCoordinator::new(Arc::clone(&self.provider), &self.config)?;
        let records = coordinator
            .extract_many(urls, self.config.extraction.max_workers)
            .await?;

        records
            .iter()
            .map(|record| record.to_json().map_err(NewsError::from))
            .collect()
    }
}
