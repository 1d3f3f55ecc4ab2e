//! In-memory provider for unit tests.
//!
//! Serves fixed documents by URL and counts how sessions are used.

use super::{DocumentProvider, Session};
use crate::{ProviderError, ProviderResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Counters {
    pub opened: AtomicUsize,
    pub closed: AtomicUsize,
    pub loads: AtomicUsize,
    pub scrolls: AtomicUsize,
    active: AtomicUsize,
    pub peak_active: AtomicUsize,
}

impl Counters {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default, Clone)]
pub struct ScriptedProvider {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    heights: Vec<u64>,
    refuse_sessions: bool,
    pub counters: Arc<Counters>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Makes loading `url` take `delay`
    pub fn slow(mut self, url: &str, delay: Duration) -> Self {
        self.delays.insert(url.to_string(), delay);
        self
    }

    /// Successive `current_height` results; the last one repeats
    pub fn heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.to_vec();
        self
    }

    pub fn refusing(mut self) -> Self {
        self.refuse_sessions = true;
        self
    }
}

#[async_trait]
impl DocumentProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn open_session(&self) -> ProviderResult<Box<dyn Session>> {
        if self.refuse_sessions {
            return Err(ProviderError::Launch("no sessions available".to_string()));
        }

        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        let active = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_active.fetch_max(active, Ordering::SeqCst);

        Ok(Box::new(ScriptedSession {
            provider: self.clone(),
            document: None,
            height_calls: 0,
            closed: false,
        }))
    }
}

pub struct ScriptedSession {
    provider: ScriptedProvider,
    document: Option<String>,
    height_calls: usize,
    closed: bool,
}

#[async_trait]
impl Session for ScriptedSession {
    async fn open(&mut self, url: &str, timeout: Duration) -> ProviderResult<()> {
        self.provider.counters.loads.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.provider.delays.get(url) {
            if *delay > timeout {
                tokio::time::sleep(timeout).await;
                return Err(ProviderError::LoadTimeout {
                    url: url.to_string(),
                    timeout,
                });
            }
            tokio::time::sleep(*delay).await;
        }

        match self.provider.pages.get(url) {
            Some(html) => {
                self.document = Some(html.clone());
                Ok(())
            }
            None => Err(ProviderError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }

    async fn page_source(&mut self) -> ProviderResult<String> {
        self.document.clone().ok_or(ProviderError::NoDocument)
    }

    async fn scroll_to_bottom(&mut self) -> ProviderResult<()> {
        self.provider.counters.scrolls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn current_height(&mut self) -> ProviderResult<u64> {
        let heights = &self.provider.heights;
        let height = heights
            .get(self.height_calls)
            .or_else(|| heights.last())
            .copied()
            .unwrap_or(1000);
        self.height_calls += 1;
        Ok(height)
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.document = None;
            self.provider.counters.closed.fetch_add(1, Ordering::SeqCst);
            self.provider.counters.active.fetch_sub(1, Ordering::SeqCst);
        }
    }
}
