//! Extraction coordinator - concurrent article extraction
//!
//! Fans a batch of article URLs out over a small pool of workers:
//! - Each worker owns one session for its whole life and reuses it
//! - Workers pull URLs from a shared queue until it is empty
//! - Every URL is bounded by a task timeout
//! - Records flow back over a channel in completion order
//!
//! A batch never fails because of one URL. Only failing to open the sessions
//! at all is reported to the caller.

use super::pool::SessionPool;
use super::effective_workers;
use crate::config::Config;
use crate::extract::ContentExtractor;
use crate::models::ArticleRecord;
use crate::provider::{DocumentProvider, Session};
use crate::{ExtractError, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Drives the content extractor over one or many URLs
pub struct ExtractionCoordinator {
    provider: Arc<dyn DocumentProvider>,
    extractor: Arc<ContentExtractor>,
    task_timeout: Duration,
}

impl ExtractionCoordinator {
    /// Creates a coordinator using the extraction and provider sections of `config`
    pub fn new(provider: Arc<dyn DocumentProvider>, config: &Config) -> Result<Self> {
        Ok(Self {
            provider,
            extractor: Arc::new(ContentExtractor::from_config(config)?),
            task_timeout: config.extraction.task_timeout(),
        })
    }

    pub fn with_extractor(mut self, extractor: ContentExtractor) -> Self {
        self.extractor = Arc::new(extractor);
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Extracts a single article in a session of its own
    pub async fn extract_one(&self, url: &str) -> Result<ArticleRecord> {
        let mut session = self.provider.open_session().await?;
        let record =
            run_task(&self.extractor, session.as_mut(), url.to_string(), self.task_timeout).await;
        session.close().await;
        Ok(record)
    }

    /// Extracts every URL with one session, in input order
    pub async fn extract_sequential(&self, urls: &[String]) -> Result<Vec<ArticleRecord>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let mut session = self.provider.open_session().await?;
        let mut records = Vec::with_capacity(urls.len());
        for url in urls {
            records.push(run_task(&self.extractor, session.as_mut(), url.clone(), self.task_timeout).await);
        }
        session.close().await;

        Ok(records)
    }

    /// Extracts every URL across up to `max_workers` workers
    ///
    /// # Arguments
    ///
    /// * `urls` - Article URLs; duplicates are extracted once per occurrence
    /// * `max_workers` - Requested concurrency, capped at the batch size and
    ///   at [`HARD_WORKER_CAP`](super::HARD_WORKER_CAP)
    ///
    /// # Returns
    ///
    /// * `Ok(records)` - One record per input URL, in completion order
    /// * `Err(NewsError)` - The worker sessions could not be opened
    pub async fn extract_many(&self, urls: &[String], max_workers: usize) -> Result<Vec<ArticleRecord>> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let workers = effective_workers(max_workers, urls.len());
        tracing::info!("Extracting {} articles with {} workers", urls.len(), workers);

        let pool = SessionPool::open(self.provider.as_ref(), workers).await?;
        let queue = Arc::new(Mutex::new(urls.iter().cloned().collect::<VecDeque<_>>()));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handles: Vec<_> = pool
            .into_slots()
            .map(|(slot, session)| {
                tokio::spawn(worker(
                    slot,
                    session,
                    Arc::clone(&queue),
                    Arc::clone(&self.extractor),
                    self.task_timeout,
                    tx.clone(),
                ))
            })
            .collect();
        drop(tx);

        let mut records = Vec::with_capacity(urls.len());
        while let Some(record) = rx.recv().await {
            records.push(record);
        }

        for (slot, handle) in handles.into_iter().enumerate() {
            if let Err(e) = handle.await {
                tracing::error!("Worker {} stopped abnormally: {}", slot, e);
            }
        }

        fill_missing(urls, &mut records);

        let failed = records.iter().filter(|r| r.is_error()).count();
        tracing::info!("Extracted {} articles ({} failed)", records.len(), failed);
        Ok(records)
    }
}

/// One worker: pulls URLs until the queue is empty, then closes its session
async fn worker(
    slot: usize,
    mut session: Box<dyn Session>,
    queue: Arc<Mutex<VecDeque<String>>>,
    extractor: Arc<ContentExtractor>,
    task_timeout: Duration,
    results: mpsc::UnboundedSender<ArticleRecord>,
) {
    let mut processed = 0usize;

    loop {
        let next = match queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        };
        let Some(url) = next else {
            break;
        };

        let record = run_task(&extractor, session.as_mut(), url, task_timeout).await;
        processed += 1;
        if results.send(record).is_err() {
            break;
        }
    }

    session.close().await;
    tracing::debug!("Worker {} finished after {} articles", slot, processed);
}

/// Extracts one URL, turning an overrun into an error record
async fn run_task(
    extractor: &ContentExtractor,
    session: &mut dyn Session,
    url: String,
    timeout: Duration,
) -> ArticleRecord {
    match tokio::time::timeout(timeout, extractor.extract(session, &url)).await {
        Ok(record) => record,
        Err(_) => {
            tracing::warn!(%url, "Extraction timed out after {:?}", timeout);
            ArticleRecord::failed(&url, ExtractError::TaskTimeout { timeout })
        }
    }
}

/// Adds an error record for every input URL that produced no record
fn fill_missing(urls: &[String], records: &mut Vec<ArticleRecord>) {
    let mut received: HashMap<&str, usize> = HashMap::new();
    for record in records.iter() {
        *received.entry(record.source_url.as_str()).or_default() += 1;
    }

    let mut missing = Vec::new();
    for url in urls {
        match received.get_mut(url.as_str()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => missing.push(url.clone()),
        }
    }

    for url in missing {
        tracing::warn!(%url, "No record produced; worker stopped early");
        records.push(ArticleRecord::failed(&url, "Worker stopped before extracting this URL"));
    }
}
