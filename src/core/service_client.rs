// src/core/service_client.rs
//! Read-only client for the hosted jobs table (Supabase / PostgREST).

use anyhow::{Context, Result};
use reqwest::header::CONTENT_RANGE;
use reqwest::RequestBuilder;
use tracing::{error, info, warn};

use crate::core::config_manager::StoreConfig;
use crate::core::job_source::JobSource;
use crate::types::job::RawJob;

const REST_PATH: &str = "/rest/v1";
const LIST_ORDER: &str = "scraped_at.desc";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl ServiceClient {
    pub fn new(base_url: &str, api_key: &str, table: &str, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            table: table.to_string(),
        })
    }

    pub fn from_config(store: &StoreConfig) -> Result<Self> {
        let url = store
            .url
            .as_deref()
            .context("No job store URL configured (set SUPABASE_URL or store.url)")?;
        let key = store
            .api_key
            .as_deref()
            .context("No job store key configured (set SUPABASE_ANON_KEY)")?;

        Self::new(url, key, &store.table, store.timeout_seconds)
    }

    fn table_url(&self) -> String {
        format!("{}{}/{}", self.base_url, REST_PATH, self.table)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Exact row count of the jobs table, if the server reports one
    pub async fn count_jobs(&self) -> Result<Option<u64>> {
        let url = format!("{}?select=*", self.table_url());

        let response = self
            .authorized(self.client.head(&url))
            .header("Prefer", "count=exact")
            .send()
            .await
            .context("Failed to request job count")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Job count request failed with status {}", status);
        }

        Ok(response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range))
    }

    /// Every job row, newest scrape first
    pub async fn fetch_jobs(&self) -> Result<Vec<RawJob>> {
        let url = format!("{}?select=*&order={}", self.table_url(), LIST_ORDER);

        info!("Fetching jobs from {}", url);

        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch jobs")?;

        let status = response.status();
        if status.is_success() {
            let jobs: Vec<RawJob> = response
                .json()
                .await
                .context("Failed to parse job rows")?;
            info!("Jobs fetched successfully: {}", jobs.len());
            Ok(jobs)
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Error fetching jobs: {} {}", status, error_text);
            anyhow::bail!("Job store returned error status {}: {}", status, error_text)
        }
    }
}

impl JobSource for ServiceClient {
    async fn list_jobs(&self) -> Result<Vec<RawJob>> {
        match self.count_jobs().await {
            Ok(Some(count)) => info!("Total jobs in database: {}", count),
            Ok(None) => warn!("Job store did not report a row count"),
            Err(e) => warn!("Could not count jobs: {:#}", e),
        }

        self.fetch_jobs().await
    }
}

/// Total from a `Content-Range` header such as `0-24/3573` or `*/0`.
pub fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
