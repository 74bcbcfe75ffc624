// src/core/job_source.rs
use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::service_client::ServiceClient;
use crate::heuristics::parse_timestamp;
use crate::types::job::RawJob;

/// Anything that can produce the full job list, newest scrape first.
pub trait JobSource {
    fn list_jobs(&self) -> impl Future<Output = Result<Vec<RawJob>>> + Send;
}

/// Jobs read from a JSON array on disk, e.g. an export of the jobs table.
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JobSource for FileJobSource {
    async fn list_jobs(&self) -> Result<Vec<RawJob>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read jobs file: {}", self.path.display()))?;

        let mut jobs: Vec<RawJob> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse jobs file: {}", self.path.display()))?;

        order_by_scraped_desc(&mut jobs);
        info!("Loaded {} jobs from {}", jobs.len(), self.path.display());
        Ok(jobs)
    }
}

/// Same order as `order=scraped_at.desc` in Postgres: rows without a usable
/// scrape time come first, then newest to oldest.
pub fn order_by_scraped_desc(jobs: &mut [RawJob]) {
    jobs.sort_by_key(|job| {
        std::cmp::Reverse(
            job.scraped_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|t| t.timestamp_millis())
                .unwrap_or(i64::MAX),
        )
    });
}

/// The configured source: hosted store or local file.
pub enum JobFeed {
    Remote(ServiceClient),
    File(FileJobSource),
}

impl JobSource for JobFeed {
    async fn list_jobs(&self) -> Result<Vec<RawJob>> {
        match self {
            JobFeed::Remote(client) => client.list_jobs().await,
            JobFeed::File(source) => source.list_jobs().await,
        }
    }
}
