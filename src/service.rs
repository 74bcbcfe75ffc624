// src/service.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::analytics::AnalyticsReport;
use crate::core::job_source::JobSource;
use crate::core::query_cache::{CachePolicy, JobQueryCache};
use crate::dashboard::DashboardSummary;
use crate::pipeline::{apply_query, ListingQuery};
use crate::types::job::JobView;
use crate::types::response::{AnalyticsResponse, DashboardResponse, ListingsResponse};
use crate::view::{build_view, build_views};

/// Job board backed by a cached [`JobSource`]. Views are rebuilt from the raw
/// rows on every call; only the fetch itself is cached.
pub struct JobBoard<S> {
    cache: JobQueryCache<S>,
}

impl<S: JobSource> JobBoard<S> {
    pub fn new(source: S, policy: CachePolicy) -> Self {
        Self {
            cache: JobQueryCache::new(source, policy),
        }
    }

    pub async fn listings(&self, query: &ListingQuery, now: DateTime<Utc>) -> ListingsResponse {
        match self.cache.jobs().await {
            Ok(jobs) => {
                let views = build_views(&jobs, now);
                let filtered = apply_query(&views, query);
                info!("Showing {} of {} jobs", filtered.len(), jobs.len());
                ListingsResponse::ok(jobs.len(), filtered)
            }
            Err(e) => {
                error!("Error loading jobs: {:#}", e);
                ListingsResponse::failed(format!("{:#}", e))
            }
        }
    }

    pub async fn dashboard(&self, now: DateTime<Utc>) -> DashboardResponse {
        match self.cache.jobs().await {
            Ok(jobs) => {
                let views = build_views(&jobs, now);
                DashboardResponse::ok(DashboardSummary::build(&jobs, &views, now))
            }
            Err(e) => {
                error!("Error loading dashboard data: {:#}", e);
                DashboardResponse::failed(format!("{:#}", e))
            }
        }
    }

    pub async fn analytics(&self, top_n: usize, now: DateTime<Utc>) -> AnalyticsResponse {
        match self.cache.jobs().await {
            Ok(jobs) => AnalyticsResponse::ok(AnalyticsReport::build(&build_views(&jobs, now), top_n)),
            Err(e) => {
                error!("Error loading analytics data: {:#}", e);
                AnalyticsResponse::failed(format!("{:#}", e))
            }
        }
    }

    pub async fn find_job(&self, id: i64, now: DateTime<Utc>) -> Result<Option<JobView>> {
        let jobs = self.cache.jobs().await?;
        Ok(jobs.iter().find(|job| job.id == id).map(|job| build_view(job, now)))
    }

    /// Drop cached rows and fetch again. Returns the number of jobs fetched.
    pub async fn refresh(&self) -> Result<usize> {
        info!("Refreshing job data...");
        let jobs = self.cache.refetch().await?;
        Ok(jobs.len())
    }
}
