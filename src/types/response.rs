// src/types/response.rs
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsReport;
use crate::dashboard::DashboardSummary;
use crate::types::job::JobView;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsResponse {
    pub success: bool,
    /// Jobs fetched before any filtering
    pub total_jobs: usize,
    pub jobs: Vec<JobView>,
    pub error: Option<String>,
}

impl ListingsResponse {
    pub fn ok(total_jobs: usize, jobs: Vec<JobView>) -> Self {
        Self {
            success: true,
            total_jobs,
            jobs,
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            total_jobs: 0,
            jobs: Vec::new(),
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub summary: Option<DashboardSummary>,
    pub error: Option<String>,
}

impl DashboardResponse {
    pub fn ok(summary: DashboardSummary) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub report: Option<AnalyticsReport>,
    pub error: Option<String>,
}

impl AnalyticsResponse {
    pub fn ok(report: AnalyticsReport) -> Self {
        Self {
            success: true,
            report: Some(report),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            report: None,
            error: Some(error),
        }
    }
}
