// src/dashboard.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::heuristics::{format_relative_time, parse_timestamp, scrape_timestamp};
use crate::types::job::{JobView, RawJob};

/// Score at or above which a job counts as a "high match" on the dashboard.
pub const HIGH_MATCH_THRESHOLD: u8 = 75;

pub const TOP_MATCHES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_jobs: usize,
    pub high_match_jobs: usize,
    pub high_match_percent: u32,
    pub new_today: usize,
    pub top_matches: Vec<JobView>,
    pub last_scrape: String,
}

impl DashboardSummary {
    /// `views` must be `build_views(jobs, now)`; both slices share an order.
    pub fn build(jobs: &[RawJob], views: &[JobView], now: DateTime<Utc>) -> Self {
        let total_jobs = jobs.len();
        let high_match_jobs = views
            .iter()
            .filter(|view| view.match_score >= HIGH_MATCH_THRESHOLD)
            .count();
        let new_today = views.iter().filter(|view| view.is_new).count();

        let high_match_percent = if total_jobs == 0 {
            0
        } else {
            (high_match_jobs as f64 / total_jobs as f64 * 100.0).round() as u32
        };

        let mut top_matches = views.to_vec();
        top_matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        top_matches.truncate(TOP_MATCHES);

        Self {
            total_jobs,
            high_match_jobs,
            high_match_percent,
            new_today,
            top_matches,
            last_scrape: last_scrape(jobs, now),
        }
    }
}

/// Relative time of the most recently scraped job, or "Never" with no jobs.
pub fn last_scrape(jobs: &[RawJob], now: DateTime<Utc>) -> String {
    let instant = |job: &RawJob| {
        scrape_timestamp(job)
            .and_then(parse_timestamp)
            .map(|t| t.timestamp_millis())
            .unwrap_or(0)
    };

    // first job wins ties, like a left fold keeping the current best
    let latest = jobs.iter().fold(None::<&RawJob>, |best, job| match best {
        Some(current) if instant(job) <= instant(current) => Some(current),
        _ => Some(job),
    });

    match latest {
        Some(job) => format_relative_time(scrape_timestamp(job), now),
        None => "Never".to_string(),
    }
}
