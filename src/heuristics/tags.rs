// src/heuristics/tags.rs
use crate::types::job::RawJob;
use crate::utils::{non_empty, text_blob};
use crate::vocabulary::{MAX_TAGS, TAG_VOCABULARY};

/// Vocabulary terms mentioned in the title or description, in vocabulary
/// order, at most [`MAX_TAGS`] of them.
pub fn extract_tags(job: &RawJob) -> Vec<String> {
    let content = text_blob(non_empty(&job.title), non_empty(&job.description));

    TAG_VOCABULARY
        .iter()
        .filter(|tag| content.contains(&tag.to_lowercase()))
        .take(MAX_TAGS)
        .map(|tag| tag.to_string())
        .collect()
}
