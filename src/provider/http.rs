//! HTTP document provider
//!
//! Fetches pages with a plain GET and treats the server-rendered HTML as the
//! document. Nothing executes on the page, so the document never changes after
//! it is loaded:
//! - waiting evaluates the condition once
//! - scrolling is a no-op
//! - the reported height is constant, which ends progressive loading after one round

use super::{DocumentProvider, Session, WaitCondition};
use crate::config::ProviderConfig;
use crate::{ProviderError, ProviderResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Provider backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpProvider {
    config: ProviderConfig,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DocumentProvider for HttpProvider {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn open_session(&self) -> ProviderResult<Box<dyn Session>> {
        let client = build_http_client(&self.config)
            .map_err(|e| ProviderError::Launch(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Box::new(HttpSession::new(client)))
    }
}

/// Builds an HTTP client with the configured user agent and load timeout
///
/// Each session gets its own client, so sessions never share a connection pool.
pub fn build_http_client(config: &ProviderConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.page_load_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// One HTTP session holding the most recently loaded document
pub struct HttpSession {
    client: Client,
    document: Option<String>,
}

impl HttpSession {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            document: None,
        }
    }
}

#[async_trait]
impl Session for HttpSession {
    async fn open(&mut self, url: &str, timeout: Duration) -> ProviderResult<()> {
        self.document = None;

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        tracing::debug!(%url, bytes = body.len(), "Loaded document over HTTP");
        self.document = Some(body);
        Ok(())
    }

    async fn page_source(&mut self) -> ProviderResult<String> {
        self.document.clone().ok_or(ProviderError::NoDocument)
    }

    async fn scroll_to_bottom(&mut self) -> ProviderResult<()> {
        Ok(())
    }

    async fn current_height(&mut self) -> ProviderResult<u64> {
        self.document
            .as_ref()
            .map(|doc| doc.len() as u64)
            .ok_or(ProviderError::NoDocument)
    }

    async fn wait_for(&mut self, condition: &WaitCondition, _timeout: Duration) -> ProviderResult<bool> {
        let source = self.page_source().await?;
        Ok(condition.is_met(&source))
    }

    async fn close(&mut self) {
        self.document = None;
    }
}

/// Maps a reqwest failure onto the provider taxonomy
fn classify_error(url: &str, timeout: Duration, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::LoadTimeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        ProviderError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
