// src/view.rs
use chrono::{DateTime, Utc};

use crate::heuristics::{
    effective_timestamp, extract_tags, format_relative_time, is_new, match_score, parse_timestamp,
};
use crate::types::job::{JobView, MatchTier, RawJob, StoredText};
use crate::utils::non_empty;

fn display_or(value: &Option<String>, fallback: &str) -> String {
    non_empty(value).unwrap_or(fallback).to_string()
}

/// Map a raw record through the heuristics into its display form.
pub fn build_view(job: &RawJob, now: DateTime<Utc>) -> JobView {
    let timestamp = effective_timestamp(job);
    let score = match_score(job);

    JobView {
        id: job.id,
        title: display_or(&job.title, "Untitled Position"),
        company: display_or(&job.company, "Unknown Company"),
        location: display_or(&job.location, "Location not specified"),
        salary: non_empty(&job.salary).map(str::to_string),
        description: display_or(&job.description, "No description available"),
        source: display_or(&job.source, "Unknown Source"),
        link: non_empty(&job.link).map(str::to_string),
        tags: extract_tags(job),
        match_score: score,
        match_tier: MatchTier::from_score(score),
        is_new: is_new(timestamp, now),
        posted_at: format_relative_time(timestamp, now),
        effective_at: timestamp.and_then(parse_timestamp),
        stored: StoredText {
            title: non_empty(&job.title).map(str::to_string),
            company: non_empty(&job.company).map(str::to_string),
            description: non_empty(&job.description).map(str::to_string),
            source: non_empty(&job.source).map(str::to_string),
        },
    }
}

pub fn build_views(jobs: &[RawJob], now: DateTime<Utc>) -> Vec<JobView> {
    jobs.iter().map(|job| build_view(job, now)).collect()
}
