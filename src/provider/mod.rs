//! Document providers
//!
//! A provider turns URLs into queryable documents. The crawler and the
//! extraction pool only ever talk to the [`DocumentProvider`] and [`Session`]
//! traits:
//! - [`HttpProvider`] fetches server-rendered HTML with reqwest
//! - `BrowserProvider` drives headless Chromium over CDP (`browser` feature)
//!
//! A session is one live connection to the provider. It is expensive to create,
//! owned by exactly one caller at a time, and reused across page loads.

#[cfg(feature = "browser")]
mod browser;
mod http;
#[cfg(test)]
pub(crate) mod scripted;

#[cfg(feature = "browser")]
pub use browser::BrowserProvider;
pub use http::{HttpProvider, HttpSession};

use crate::config::{ProviderConfig, ProviderKind};
use crate::url::{resolve_link, ArticleUrlPattern};
use crate::{ExtractError, ProviderResult};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// How often a polling wait re-reads the page
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Factory for document sessions
#[async_trait]
pub trait DocumentProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Creates a new, exclusively owned session
    ///
    /// Failing here means the provider itself is unavailable, which callers
    /// surface as an operational error rather than an empty result.
    async fn open_session(&self) -> ProviderResult<Box<dyn Session>>;
}

/// One live connection to a document provider
///
/// The session holds at most one loaded document at a time; `open` replaces it.
#[async_trait]
pub trait Session: Send {
    /// Loads `url`, giving up after `timeout`
    async fn open(&mut self, url: &str, timeout: Duration) -> ProviderResult<()>;

    /// Serialized HTML of the currently loaded document
    async fn page_source(&mut self) -> ProviderResult<String>;

    /// Scrolls the viewport to the bottom of the document
    async fn scroll_to_bottom(&mut self) -> ProviderResult<()>;

    /// Current scroll height of the document
    async fn current_height(&mut self) -> ProviderResult<u64>;

    /// Waits until `condition` holds for the loaded document
    ///
    /// Returns `Ok(false)` if the timeout elapses first. The default
    /// implementation polls the page source.
    async fn wait_for(&mut self, condition: &WaitCondition, timeout: Duration) -> ProviderResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let source = self.page_source().await?;
            if condition.is_met(&source) {
                return Ok(true);
            }

            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(WAIT_POLL_INTERVAL.min(deadline - now)).await;
        }
    }

    /// Releases the session. Idempotent and infallible.
    async fn close(&mut self);
}

/// Condition a session can wait for
#[derive(Debug, Clone)]
pub enum WaitCondition {
    /// At least one element matches the selector
    Element(Selector),

    /// At least one anchor resolves to an article URL
    ArticleLink {
        base: Url,
        pattern: ArticleUrlPattern,
        anchors: Selector,
    },
}

impl WaitCondition {
    /// Waits for an element matching `css`
    pub fn element(css: &str) -> Result<Self, ExtractError> {
        Ok(Self::Element(parse_selector(css)?))
    }

    /// Waits for an anchor pointing at an article
    pub fn article_link(base: Url, pattern: ArticleUrlPattern) -> Result<Self, ExtractError> {
        Ok(Self::ArticleLink {
            base,
            pattern,
            anchors: parse_selector("a[href]")?,
        })
    }

    /// Evaluates the condition against a serialized document
    pub fn is_met(&self, source: &str) -> bool {
        let document = Html::parse_document(source);
        match self {
            Self::Element(selector) => document.select(selector).next().is_some(),
            Self::ArticleLink {
                base,
                pattern,
                anchors,
            } => document.select(anchors).any(|anchor| {
                anchor
                    .value()
                    .attr("href")
                    .and_then(|href| resolve_link(href, base))
                    .map_or(false, |url| pattern.matches(url.as_str()))
            }),
        }
    }
}

/// Compiles a CSS selector, keeping the offending text in the error
pub(crate) fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Builds the provider selected in the configuration
pub fn build_provider(config: &ProviderConfig) -> ProviderResult<Arc<dyn DocumentProvider>> {
    match config.kind {
        ProviderKind::Http => Ok(Arc::new(HttpProvider::new(config.clone()))),
        #[cfg(feature = "browser")]
        ProviderKind::Browser => Ok(Arc::new(BrowserProvider::new(config.clone()))),
        #[cfg(not(feature = "browser"))]
        ProviderKind::Browser => Err(crate::ProviderError::Launch(
            "Browser support not compiled. Rebuild with: cargo build --features browser"
                .to_string(),
        )),
    }
}
