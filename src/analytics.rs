// src/analytics.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::job::JobView;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

/// Distributions shown on the analytics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_jobs: usize,
    pub sources: Vec<CountEntry>,
    pub skills: Vec<CountEntry>,
    pub locations: Vec<CountEntry>,
    pub average_match_score: f64,
}

impl AnalyticsReport {
    pub fn build(views: &[JobView], top_n: usize) -> Self {
        let average_match_score = if views.is_empty() {
            0.0
        } else {
            let total: u32 = views.iter().map(|v| v.match_score as u32).sum();
            total as f64 / views.len() as f64
        };

        Self {
            total_jobs: views.len(),
            sources: count_by(views.iter().map(|v| v.source.as_str()), top_n),
            skills: count_by(
                views.iter().flat_map(|v| v.tags.iter().map(String::as_str)),
                top_n,
            ),
            locations: count_by(views.iter().map(|v| v.location.as_str()), top_n),
            average_match_score,
        }
    }
}

/// Count occurrences, most frequent first, ties by name.
fn count_by<'a>(values: impl Iterator<Item = &'a str>, top_n: usize) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(name, count)| CountEntry {
            name: name.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(top_n);
    entries
}
