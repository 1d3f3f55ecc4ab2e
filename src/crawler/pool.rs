//! Fixed-size pool of document sessions
//!
//! Each slot holds one session owned by exactly one worker. Slots are handed
//! out by value, so two workers can never reach the same session.

use crate::provider::{DocumentProvider, Session};
use crate::ProviderResult;
use futures::future::join_all;

pub struct SessionPool {
    slots: Vec<Box<dyn Session>>,
}

impl SessionPool {
    /// Opens `size` sessions concurrently
    ///
    /// If any session fails to open, the ones that did open are closed and
    /// the first error is returned.
    pub async fn open(provider: &dyn DocumentProvider, size: usize) -> ProviderResult<Self> {
        let results = join_all((0..size).map(|_| provider.open_session())).await;

        let mut slots = Vec::with_capacity(size);
        let mut failure = None;
        for result in results {
            match result {
                Ok(session) => slots.push(session),
                Err(e) => {
                    tracing::error!("Failed to open {} session: {}", provider.name(), e);
                    failure.get_or_insert(e);
                }
            }
        }

        let mut pool = Self { slots };
        match failure {
            Some(e) => {
                pool.close_all().await;
                Err(e)
            }
            None => {
                tracing::debug!("Opened {} {} sessions", pool.len(), provider.name());
                Ok(pool)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Hands out every session together with its slot index
    pub fn into_slots(self) -> impl Iterator<Item = (usize, Box<dyn Session>)> {
        self.slots.into_iter().enumerate()
    }

    pub async fn close_all(&mut self) {
        for session in &mut self.slots {
            session.close().await;
        }
        self.slots.clear();
    }
}
