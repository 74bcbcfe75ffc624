// src/heuristics/score.rs
use crate::types::job::RawJob;
use crate::utils::{non_empty, text_blob};
use crate::vocabulary::{KEYWORD_BONUS, SCORE_KEYWORDS};

const MAX_SCORE: u32 = 100;

/// Placeholder relevance score in `0..=100`.
///
/// Field presence contributes up to 100 on its own; every distinct keyword in
/// the title/description adds a flat bonus before the final clamp. The weights
/// are kept as-is for compatibility with scores already shown to users.
pub fn match_score(job: &RawJob) -> u8 {
    let weights: [(&Option<String>, u32); 6] = [
        (&job.title, 20),
        (&job.company, 20),
        (&job.location, 15),
        (&job.salary, 15),
        (&job.description, 20),
        (&job.source, 10),
    ];

    let presence: u32 = weights
        .iter()
        .filter(|(field, _)| non_empty(field).is_some())
        .map(|(_, weight)| weight)
        .sum();

    let content = text_blob(non_empty(&job.title), non_empty(&job.description));
    let keyword_hits = SCORE_KEYWORDS
        .iter()
        .filter(|keyword| content.contains(*keyword))
        .count() as u32;

    (presence + keyword_hits * KEYWORD_BONUS).min(MAX_SCORE) as u8
}
