//! Job listing dashboard core: derives scored, tagged views from scraped job
//! rows and filters/sorts them for display.

use chrono::{DateTime, Utc};

pub mod actions;
pub mod analytics;
pub mod cli;
pub mod core;
pub mod dashboard;
pub mod heuristics;
pub mod pipeline;
pub mod service;
pub mod types;
pub mod utils;
pub mod view;
pub mod vocabulary;

pub use pipeline::{apply_query, ListingQuery, SalaryOrdering, SortDirection, SortKey, SourceFilter};
pub use service::JobBoard;
pub use types::job::{JobView, MatchTier, RawJob, StoredText};
pub use view::{build_view, build_views};

/// Map raw rows to views, then search, filter and sort them in one pass
pub fn derive_listings(jobs: &[RawJob], query: &ListingQuery, now: DateTime<Utc>) -> Vec<JobView> {
    apply_query(&build_views(jobs, now), query)
}
