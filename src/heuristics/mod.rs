// src/heuristics/mod.rs
//! Pure per-record heuristics. Each function is total over every combination
//! of missing fields and never touches a clock: time-based ones take `now`.

pub mod recency;
pub mod score;
pub mod tags;

pub use recency::{
    effective_timestamp, format_relative_time, is_new, parse_timestamp, scrape_timestamp,
};
pub use score::match_score;
pub use tags::extract_tags;
