// src/vocabulary.rs
//! Fixed term lists used by the scoring and tagging heuristics.
//!
//! Order matters: tag extraction walks [`TAG_VOCABULARY`] front to back and
//! stops after [`MAX_TAGS`] hits, so earlier terms take precedence. Bump
//! [`VOCABULARY_VERSION`] whenever either list changes.

pub const VOCABULARY_VERSION: u32 = 1;

/// Each distinct keyword found in the title/description adds
/// [`KEYWORD_BONUS`] to the match score.
pub const SCORE_KEYWORDS: &[&str] = &["python", "developer", "engineer", "tech", "software", "data"];

pub const KEYWORD_BONUS: u32 = 5;

pub const TAG_VOCABULARY: &[&str] = &[
    // languages and tooling
    "Python",
    "JavaScript",
    "React",
    "Node.js",
    "SQL",
    "PostgreSQL",
    "AWS",
    "Docker",
    "Git",
    "Django",
    "Flask",
    "API",
    "REST",
    "GraphQL",
    // data / ML
    "Machine Learning",
    "Data Science",
    "AI",
    "TensorFlow",
    "PyTorch",
    // employment type and seniority
    "Remote",
    "Full-time",
    "Part-time",
    "Contract",
    "Senior",
    "Junior",
];

pub const MAX_TAGS: usize = 4;

pub fn is_tag(term: &str) -> bool {
    TAG_VOCABULARY.contains(&term)
}
