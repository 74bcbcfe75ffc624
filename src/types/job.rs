// src/types/job.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A job row as stored by the scraper. Every text column is nullable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJob {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub scraped_at: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Search query the scraper ran when it found this row.
    #[serde(default)]
    pub query: Option<String>,
}

impl RawJob {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

/// Coarse band of a match score, used to colour the score badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Strong,
    Good,
    Fair,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 80 {
            MatchTier::Strong
        } else if score >= 60 {
            MatchTier::Good
        } else {
            MatchTier::Fair
        }
    }
}

/// Text columns as stored, before display fallbacks are applied. Search and
/// the source filter read these so placeholder text never matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredText {
    pub title: Option<String>,
    pub company: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
}

/// Display-ready job, rebuilt from a [`RawJob`] on every derivation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobView {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: String,
    pub source: String,
    pub link: Option<String>,
    pub tags: Vec<String>,
    pub match_score: u8,
    pub match_tier: MatchTier,
    pub is_new: bool,
    pub posted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub stored: StoredText,
}
