// src/utils.rs

/// Treat empty strings the same as missing values
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Lowercase "title description" text used by the keyword and tag scans
pub fn text_blob(title: Option<&str>, description: Option<&str>) -> String {
    format!(
        "{} {}",
        title.unwrap_or_default(),
        description.unwrap_or_default()
    )
    .to_lowercase()
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub fn contains_lowercase(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Normalize a free-text filter value: trimmed and lowercased
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Keep only ASCII digits
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
