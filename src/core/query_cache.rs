// src/core/query_cache.rs
//! Fetch-and-cache wrapper around a [`JobSource`].
//!
//! Holds the last complete job list, serves it while fresh, and refetches with
//! exponential backoff when stale. A failed fetch never replaces cached data
//! and never yields a partial list.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::core::job_source::JobSource;
use crate::types::job::RawJob;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    /// Zero means every read refetches
    pub stale_after: Duration,
    /// Extra attempts after the first failure
    pub retries: u32,
    pub retry_base_delay: Duration,
    pub max_retry_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::ZERO,
            retries: 3,
            retry_base_delay: Duration::from_millis(1000),
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

impl CachePolicy {
    /// Delay before retry number `attempt` (0-based)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.retry_base_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

struct CacheEntry {
    jobs: Arc<Vec<RawJob>>,
    fetched_at: Instant,
}

pub struct JobQueryCache<S> {
    source: S,
    policy: CachePolicy,
    entry: RwLock<Option<CacheEntry>>,
    fetch_lock: Mutex<()>,
}

impl<S: JobSource> JobQueryCache<S> {
    pub fn new(source: S, policy: CachePolicy) -> Self {
        Self {
            source,
            policy,
            entry: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached jobs if still fresh, otherwise a new fetch
    pub async fn jobs(&self) -> Result<Arc<Vec<RawJob>>> {
        if let Some(jobs) = self.fresh().await {
            debug!("Serving {} cached jobs", jobs.len());
            return Ok(jobs);
        }

        // one fetch at a time; a waiter may find the data already refreshed
        let _guard = self.fetch_lock.lock().await;
        if let Some(jobs) = self.fresh().await {
            return Ok(jobs);
        }
        self.fetch_and_store().await
    }

    /// Fetch now, ignoring freshness
    pub async fn refetch(&self) -> Result<Arc<Vec<RawJob>>> {
        let _guard = self.fetch_lock.lock().await;
        self.fetch_and_store().await
    }

    pub async fn invalidate(&self) {
        *self.entry.write().await = None;
    }

    pub async fn is_stale(&self) -> bool {
        self.fresh().await.is_none()
    }

    async fn fresh(&self) -> Option<Arc<Vec<RawJob>>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.policy.stale_after)
            .map(|entry| Arc::clone(&entry.jobs))
    }

    async fn fetch_and_store(&self) -> Result<Arc<Vec<RawJob>>> {
        let jobs = Arc::new(self.fetch_with_retry().await?);

        *self.entry.write().await = Some(CacheEntry {
            jobs: Arc::clone(&jobs),
            fetched_at: Instant::now(),
        });

        Ok(jobs)
    }

    async fn fetch_with_retry(&self) -> Result<Vec<RawJob>> {
        let mut attempt = 0;
        loop {
            match self.source.list_jobs().await {
                Ok(jobs) => {
                    if attempt > 0 {
                        info!("Job fetch succeeded after {} retries", attempt);
                    }
                    return Ok(jobs);
                }
                Err(e) if attempt < self.policy.retries => {
                    let delay = self.policy.retry_delay(attempt);
                    warn!(
                        "Job fetch attempt {} failed: {:#}. Retrying in {:?}",
                        attempt + 1,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e.context(format!(
                        "Job fetch failed after {} attempts",
                        attempt + 1
                    )));
                }
            }
        }
    }
}
