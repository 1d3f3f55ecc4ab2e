//! Crawler module for listing discovery and article extraction
//!
//! This module contains the two drivers that load pages through a
//! [`DocumentProvider`](crate::provider::DocumentProvider):
//! - [`ListCrawler`]: one session, scrolls a listing page and collects recent links
//! - [`ExtractionCoordinator`]: a bounded worker pool extracting article content
//! - [`SessionPool`]: the per-worker sessions behind the coordinator

mod coordinator;
mod listing;
mod pool;

pub use coordinator::ExtractionCoordinator;
pub use listing::{apply_window, assign_ids, ListCrawler};
pub use pool::SessionPool;

/// Upper bound on concurrent extraction workers, whatever the caller asks for
pub const HARD_WORKER_CAP: usize = 5;

/// Number of workers actually started for a batch
///
/// # Example
///
/// ```
/// use newsline_crawler::crawler::effective_workers;
///
/// assert_eq!(effective_workers(3, 10), 3);
/// assert_eq!(effective_workers(8, 10), 5);
/// assert_eq!(effective_workers(3, 2), 2);
/// ```
pub fn effective_workers(requested: usize, batch: usize) -> usize {
    requested.min(batch).min(HARD_WORKER_CAP).max(1)
}
