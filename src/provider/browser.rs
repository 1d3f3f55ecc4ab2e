//! Headless Chromium document provider.
//!
//! Uses chromiumoxide (CDP) so that script-rendered listing pages and
//! infinite-scroll feeds can be loaded. Every session launches its own browser
//! process; sessions never share a browser.

use super::{DocumentProvider, Session};
use crate::config::ProviderConfig;
use crate::{ProviderError, ProviderResult};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const SCROLL_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight);";
const HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Provider that launches one headless Chromium per session
pub struct BrowserProvider {
    config: ProviderConfig,
}

impl BrowserProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> ProviderResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder();

        // with_head means NOT headless
        if !self.config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-plugins")
            .arg(format!("--user-agent={}", self.config.user_agent));

        for arg in &self.config.chrome_args {
            builder = builder.arg(arg);
        }

        builder
            .build()
            .map_err(|e| ProviderError::Launch(format!("Failed to build browser config: {}", e)))
    }
}

#[async_trait]
impl DocumentProvider for BrowserProvider {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn open_session(&self) -> ProviderResult<Box<dyn Session>> {
        info!(headless = self.config.headless, "Launching browser session");

        let (browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| ProviderError::Launch(format!("Failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let mut session = BrowserSession {
                    browser: Some(browser),
                    page: None,
                    handler: Some(handler),
                };
                session.close().await;
                return Err(ProviderError::Launch(format!("Failed to open tab: {}", e)));
            }
        };

        Ok(Box::new(BrowserSession {
            browser: Some(browser),
            page: Some(page),
            handler: Some(handler),
        }))
    }
}

/// One browser process with a single reusable tab
pub struct BrowserSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler: Option<JoinHandle<()>>,
}

impl BrowserSession {
    fn page(&self) -> ProviderResult<&Page> {
        self.page.as_ref().ok_or(ProviderError::NoDocument)
    }
}

#[async_trait]
impl Session for BrowserSession {
    async fn open(&mut self, url: &str, timeout: Duration) -> ProviderResult<()> {
        let page = self.page()?;
        debug!(%url, "Navigating");

        match tokio::time::timeout(timeout, page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(ProviderError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            }),
            Err(_) => Err(ProviderError::LoadTimeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    async fn page_source(&mut self) -> ProviderResult<String> {
        self.page()?
            .content()
            .await
            .map_err(|e| ProviderError::Script(e.to_string()))
    }

    async fn scroll_to_bottom(&mut self) -> ProviderResult<()> {
        self.page()?
            .evaluate(SCROLL_SCRIPT)
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::Script(e.to_string()))
    }

    async fn current_height(&mut self) -> ProviderResult<u64> {
        self.page()?
            .evaluate(HEIGHT_SCRIPT)
            .await
            .map_err(|e| ProviderError::Script(e.to_string()))?
            .into_value::<u64>()
            .map_err(|e| ProviderError::Script(e.to_string()))
    }

    async fn close(&mut self) {
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close tab: {}", e);
            }
        }

        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser: {}", e);
            }
            let _ = browser.wait().await;
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Browser's own Drop kills the child process; only the CDP pump is left.
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}
