// src/heuristics/recency.rs
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::types::job::RawJob;
use crate::utils::non_empty;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse the timestamp formats the job store emits. Values without an offset
/// are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Postgres renders `timestamptz` as `2024-05-01 10:00:00+00`
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `posted_at` if present, else `scraped_at`.
pub fn effective_timestamp(job: &RawJob) -> Option<&str> {
    non_empty(&job.posted_at).or_else(|| non_empty(&job.scraped_at))
}

/// `scraped_at` if present, else `posted_at`. Only the "last scrape" display
/// uses this order.
pub fn scrape_timestamp(job: &RawJob) -> Option<&str> {
    non_empty(&job.scraped_at).or_else(|| non_empty(&job.posted_at))
}

/// Human relative time such as "3h ago". Every bucket floors.
pub fn format_relative_time(timestamp: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(date) = timestamp.and_then(parse_timestamp) else {
        return "Unknown".to_string();
    };

    let hours = (now - date).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("{}w ago", weeks);
    }

    date.format("%-m/%-d/%Y").to_string()
}

/// True when the timestamp is at most 24 hours old.
pub fn is_new(timestamp: Option<&str>, now: DateTime<Utc>) -> bool {
    timestamp
        .and_then(parse_timestamp)
        .map(|date| now - date <= Duration::hours(24))
        .unwrap_or(false)
}
