// src/pipeline.rs
//! Search, source filter and sort over derived job views.
//!
//! Composition order is fixed: search, then source filter, then a stable sort.
//! Nothing here can fail; malformed values sort as 0 / epoch.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

use crate::types::job::JobView;
use crate::utils::{contains_lowercase, digits_only, normalize_term};

/// Source filter value meaning "no source filter".
pub const ALL_SOURCES: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceFilter {
    #[default]
    All,
    Matching(String),
}

impl SourceFilter {
    pub fn parse(value: &str) -> Self {
        let value = normalize_term(value);
        if value.is_empty() || value == ALL_SOURCES {
            SourceFilter::All
        } else {
            SourceFilter::Matching(value)
        }
    }

    /// A record without a stored source only passes the `All` filter.
    fn accepts(&self, source: Option<&str>) -> bool {
        match self {
            SourceFilter::All => true,
            SourceFilter::Matching(wanted) => {
                source.is_some_and(|source| contains_lowercase(source, wanted))
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Match,
    Date,
    Salary,
    /// Kept so an unrecognised key from the UI or config still sorts (as a no-op)
    Unknown(String),
}

impl SortKey {
    pub fn parse(value: &str) -> Self {
        match normalize_term(value).as_str() {
            "match" => SortKey::Match,
            "date" => SortKey::Date,
            "salary" => SortKey::Salary,
            _ => SortKey::Unknown(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(value: &str) -> Self {
        match normalize_term(value).as_str() {
            "asc" | "ascending" => SortDirection::Asc,
            _ => SortDirection::Desc,
        }
    }
}

/// How the salary sort turns free-text salaries into numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryOrdering {
    /// Strip every non-digit and parse what is left, so "$80K-$120K" sorts as
    /// 80120. Matches the ordering users already see. Digit runs too long for
    /// a `u64` saturate at `u64::MAX`.
    #[default]
    Digits,
    /// First number in the text. A trailing `k` reads it as thousands, with one
    /// optional decimal fraction ("$80.5K" is 80500).
    LowerBound,
}

impl SalaryOrdering {
    pub fn value_of(&self, salary: Option<&str>) -> u64 {
        let Some(salary) = salary else {
            return 0;
        };
        match self {
            SalaryOrdering::Digits => parse_digits(&digits_only(salary)),
            SalaryOrdering::LowerBound => lower_bound(salary),
        }
    }
}

/// Parse an all-digit string; empty is 0 and overflow saturates.
fn parse_digits(digits: &str) -> u64 {
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

fn lower_bound(salary: &str) -> u64 {
    let Some(start) = salary.find(|c: char| c.is_ascii_digit()) else {
        return 0;
    };

    let rest = &salary[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == ','))
        .unwrap_or(rest.len());
    let amount = parse_digits(&digits_only(&rest[..end]));
    let tail = &rest[end..];

    // "80.5K": fraction digits only count when a thousands suffix follows
    let (fraction, tail) = match tail.strip_prefix('.') {
        Some(after_dot) => {
            let len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            (&after_dot[..len], &after_dot[len..])
        }
        None => ("", tail),
    };

    match tail.chars().next() {
        Some('k') | Some('K') => {
            let thousandths: String = fraction.chars().chain("000".chars()).take(3).collect();
            amount
                .saturating_mul(1000)
                .saturating_add(parse_digits(&thousandths))
        }
        _ => amount,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub search: String,
    pub source: SourceFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub salary_ordering: SalaryOrdering,
    pub limit: Option<usize>,
}

impl ListingQuery {
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = search.to_string();
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = SourceFilter::parse(source);
        self
    }

    pub fn with_sort(mut self, sort: SortKey, direction: SortDirection) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn with_salary_ordering(mut self, ordering: SalaryOrdering) -> Self {
        self.salary_ordering = ordering;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

/// Search stored text only; display placeholders such as "Unknown Company"
/// never match.
fn matches_search(view: &JobView, term: &str) -> bool {
    let stored = &view.stored;
    [&stored.title, &stored.company, &stored.description]
        .into_iter()
        .flatten()
        .any(|text| contains_lowercase(text, term))
        || view.tags.iter().any(|tag| contains_lowercase(tag, term))
}

fn compare(a: &JobView, b: &JobView, query: &ListingQuery) -> Ordering {
    match &query.sort {
        SortKey::Match => a.match_score.cmp(&b.match_score),
        SortKey::Date => {
            let instant = |v: &JobView| v.effective_at.map(|t| t.timestamp_millis()).unwrap_or(0);
            instant(a).cmp(&instant(b))
        }
        SortKey::Salary => {
            let ordering = query.salary_ordering;
            ordering
                .value_of(a.salary.as_deref())
                .cmp(&ordering.value_of(b.salary.as_deref()))
        }
        SortKey::Unknown(_) => Ordering::Equal,
    }
}

/// Filter and order `views` for a listing page. Returns a new collection.
pub fn apply_query(views: &[JobView], query: &ListingQuery) -> Vec<JobView> {
    let term = normalize_term(&query.search);

    let mut result: Vec<JobView> = views
        .iter()
        .filter(|view| term.is_empty() || matches_search(view, &term))
        .filter(|view| query.source.accepts(view.stored.source.as_deref()))
        .cloned()
        .collect();

    if let SortKey::Unknown(key) = &query.sort {
        warn!("Unknown sort key '{}', keeping fetch order", key);
    }

    // sort_by is stable, so ties keep their input order in both directions
    result.sort_by(|a, b| {
        let ordering = compare(a, b, query);
        match query.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    if let Some(limit) = query.limit {
        result.truncate(limit);
    }

    debug!(
        "Listing query kept {} of {} jobs (search='{}', source={:?}, sort={:?} {:?})",
        result.len(),
        views.len(),
        term,
        query.source,
        query.sort,
        query.direction
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::{MatchTier, RawJob, StoredText};
    use crate::view::build_views;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn view(id: i64, title: &str, score: u8) -> JobView {
        JobView {
            id,
            title: title.to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            salary: None,
            description: "No description available".to_string(),
            source: "Unknown Source".to_string(),
            link: None,
            tags: Vec::new(),
            match_score: score,
            match_tier: MatchTier::from_score(score),
            is_new: false,
            posted_at: "Unknown".to_string(),
            effective_at: None,
            stored: StoredText {
                title: Some(title.to_string()),
                company: Some("Acme".to_string()),
                ..StoredText::default()
            },
        }
    }

    fn ids(views: &[JobView]) -> Vec<i64> {
        views.iter().map(|v| v.id).collect()
    }

    #[test]
    fn test_blank_search_is_noop() {
        let views = vec![view(1, "A", 10), view(2, "B", 20)];
        let query = ListingQuery::default()
            .with_search("   ")
            .with_sort(SortKey::Unknown("none".into()), SortDirection::Asc);
        assert_eq!(ids(&apply_query(&views, &query)), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_tags_only() {
        let mut tagged = view(1, "Backend role", 50);
        tagged.tags = vec!["Python".to_string()];
        let views = vec![tagged, view(2, "Frontend role", 50)];

        let result = apply_query(&views, &ListingQuery::default().with_search("python"));
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_search_matches_title_company_description() {
        let mut by_company = view(2, "Analyst", 10);
        by_company.stored.company = Some("PyThOnista Labs".to_string());
        let mut by_description = view(3, "Analyst", 10);
        by_description.stored.description = Some("Scripting in Python".to_string());
        let views = vec![view(1, "Python Dev", 10), by_company, by_description, view(4, "Cook", 10)];

        let result = apply_query(&views, &ListingQuery::default().with_search("  PYTHON "));
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_source_filter() {
        let mut indeed = view(1, "A", 10);
        indeed.stored.source = Some("Indeed.com".to_string());
        let mut remoteok = view(2, "B", 10);
        remoteok.stored.source = Some("RemoteOK".to_string());
        let views = vec![indeed, remoteok, view(3, "C", 10)];

        let only_indeed = apply_query(&views, &ListingQuery::default().with_source("indeed"));
        assert_eq!(ids(&only_indeed), vec![1]);

        let all = apply_query(&views, &ListingQuery::default().with_source("all"));
        assert_eq!(all.len(), 3);
        let empty = apply_query(&views, &ListingQuery::default().with_source(""));
        assert_eq!(empty.len(), 3);
    }

    #[test]
    fn test_missing_source_never_matches_concrete_filter() {
        let jobs = vec![
            RawJob {
                source: Some("indeed".into()),
                ..RawJob::new(1)
            },
            RawJob::new(2),
        ];
        let views = build_views(&jobs, now());
        assert_eq!(views[1].source, "Unknown Source");

        for filter in ["unknown", "source", "own"] {
            let result = apply_query(&views, &ListingQuery::default().with_source(filter));
            assert!(result.is_empty(), "filter '{}' matched {:?}", filter, ids(&result));
        }
        let all = apply_query(&views, &ListingQuery::default().with_source(ALL_SOURCES));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_search_ignores_display_placeholders() {
        let views = build_views(&[RawJob::new(1)], now());
        for term in ["untitled", "unknown company", "no description"] {
            assert!(apply_query(&views, &ListingQuery::default().with_search(term)).is_empty());
        }
    }

    #[test]
    fn test_match_sort_is_stable_in_both_directions() {
        let views = vec![view(1, "A", 70), view(2, "B", 90), view(3, "C", 70), view(4, "D", 10)];

        let desc = apply_query(&views, &ListingQuery::default());
        assert_eq!(ids(&desc), vec![2, 1, 3, 4]);

        let asc = apply_query(
            &views,
            &ListingQuery::default().with_sort(SortKey::Match, SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec![4, 1, 3, 2]);
    }

    #[test]
    fn test_date_sort_treats_missing_as_epoch() {
        let mut recent = view(1, "A", 0);
        recent.effective_at = Some(now() - Duration::hours(1));
        let mut older = view(2, "B", 0);
        older.effective_at = Some(now() - Duration::days(3));
        let missing = view(3, "C", 0);
        let views = vec![missing, older, recent];

        let desc = apply_query(
            &views,
            &ListingQuery::default().with_sort(SortKey::Date, SortDirection::Desc),
        );
        assert_eq!(ids(&desc), vec![1, 2, 3]);

        let asc = apply_query(
            &views,
            &ListingQuery::default().with_sort(SortKey::Date, SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec![3, 2, 1]);
    }

    #[test]
    fn test_salary_sort_digit_stripping() {
        let mut range = view(1, "A", 0);
        range.salary = Some("$80K–$120K".to_string());
        let mut flat = view(2, "B", 0);
        flat.salary = Some("$95,000".to_string());
        let mut text = view(3, "C", 0);
        text.salary = Some("Competitive".to_string());
        let views = vec![text, flat, range, view(4, "D", 0)];

        let query = ListingQuery::default().with_sort(SortKey::Salary, SortDirection::Desc);
        // the range collapses to 80120, below the flat 95000
        assert_eq!(ids(&apply_query(&views, &query)), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_salary_lower_bound_ordering() {
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$80K–$120K")), 80_000);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$95,000 - $110,000")), 95_000);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("up to 500 USD")), 500);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("DOE")), 0);
        assert_eq!(SalaryOrdering::LowerBound.value_of(None), 0);
        assert_eq!(SalaryOrdering::Digits.value_of(Some("$80K–$120K")), 80120);
    }

    #[test]
    fn test_salary_lower_bound_decimal_thousands() {
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$80.5K - $95K")), 80_500);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$1.25k")), 1_250);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$1.2345k")), 1_234);
        // fraction without a thousands suffix is dropped
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("$95,000.00")), 95_000);
        assert_eq!(SalaryOrdering::LowerBound.value_of(Some("12.50 per hour")), 12);
    }

    #[test]
    fn test_salary_digits_saturate_on_overflow() {
        let big = SalaryOrdering::Digits
            .value_of(Some("$120,000 - $180,000 USD + $20,000 - $40,000 bonus"));
        let small = SalaryOrdering::Digits.value_of(Some("$500"));
        assert_eq!(big, u64::MAX);
        assert!(big > small);
        assert_eq!(SalaryOrdering::Digits.value_of(Some("Competitive")), 0);

        let mut large = view(1, "A", 0);
        large.salary = Some("$120,000 - $180,000 USD + $20,000 - $40,000 bonus".to_string());
        let mut modest = view(2, "B", 0);
        modest.salary = Some("$500".to_string());
        let query = ListingQuery::default().with_sort(SortKey::Salary, SortDirection::Desc);
        assert_eq!(ids(&apply_query(&[modest, large], &query)), vec![1, 2]);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let views = vec![view(1, "A", 10), view(2, "B", 90), view(3, "C", 50)];
        let query =
            ListingQuery::default().with_sort(SortKey::parse("relevance"), SortDirection::Desc);
        assert_eq!(ids(&apply_query(&views, &query)), vec![1, 2, 3]);
    }

    #[test]
    fn test_limit_applies_after_sort() {
        let views = vec![view(1, "A", 10), view(2, "B", 90), view(3, "C", 50)];
        let query = ListingQuery::default().with_limit(Some(2));
        assert_eq!(ids(&apply_query(&views, &query)), vec![2, 3]);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(SortKey::parse("Date"), SortKey::Date);
        assert_eq!(SortKey::parse(" salary "), SortKey::Salary);
        assert_eq!(SortKey::parse("xyz"), SortKey::Unknown("xyz".into()));
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SourceFilter::parse(" All "), SourceFilter::All);
        assert_eq!(SourceFilter::parse("WWR"), SourceFilter::Matching("wwr".into()));
    }

    #[test]
    fn test_end_to_end_python_search() {
        let jobs = vec![
            RawJob {
                title: Some("Senior Python Developer".into()),
                company: Some("Acme".into()),
                location: Some("Remote".into()),
                salary: Some("$80K-$120K".into()),
                description: Some("Build REST APIs with Django and PostgreSQL".into()),
                source: Some("indeed".into()),
                scraped_at: Some((now() - Duration::hours(2)).to_rfc3339()),
                link: Some("https://example.com/jobs/1".into()),
                ..RawJob::new(1)
            },
            RawJob {
                company: Some("Globex".into()),
                location: Some("Berlin".into()),
                description: Some("Warehouse logistics coordinator".into()),
                source: Some("remoteok".into()),
                scraped_at: Some((now() - Duration::days(30)).to_rfc3339()),
                ..RawJob::new(2)
            },
            RawJob::new(3),
        ];

        let views = build_views(&jobs, now());
        let query = ListingQuery::default()
            .with_search("python")
            .with_source(ALL_SOURCES)
            .with_sort(SortKey::Match, SortDirection::Desc);
        let result = apply_query(&views, &query);

        assert_eq!(ids(&result), vec![1]);
        assert_eq!(result[0].match_score, 100);
        assert!(result[0].is_new);
        assert_eq!(views[1].posted_at, "5/16/2024");
        assert_eq!(views[2].match_score, 0);
    }
}
