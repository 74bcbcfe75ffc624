// src/core/config_manager.rs
//! Configuration: optional `config.yaml` with per-environment sections, then
//! environment-variable overrides for the store credentials.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::core::query_cache::CachePolicy;
use crate::pipeline::{ListingQuery, SalaryOrdering, SortDirection, SortKey, ALL_SOURCES};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub listings: ListingDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub timeout_seconds: u64,
    /// Read jobs from a JSON dump instead of the hosted store
    pub jobs_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: "jobs".to_string(),
            timeout_seconds: 30,
            jobs_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub stale_seconds: u64,
    pub retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        let policy = CachePolicy::default();
        Self {
            stale_seconds: policy.stale_after.as_secs(),
            retries: policy.retries,
            retry_base_delay_ms: policy.retry_base_delay.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingDefaults {
    pub sort: String,
    pub direction: SortDirection,
    pub source: String,
    pub salary_ordering: SalaryOrdering,
}

impl Default for ListingDefaults {
    fn default() -> Self {
        Self {
            sort: "match".to_string(),
            direction: SortDirection::Desc,
            source: ALL_SOURCES.to_string(),
            salary_ordering: SalaryOrdering::Digits,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    store: StoreConfig,
    cache: CacheConfig,
    listings: ListingDefaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load `config.yaml` from the working directory (if any) plus env overrides
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Self::from_yaml(&content, &environment)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            info!("{} not found, using built-in defaults", path.display());
            Self::from_section(EnvironmentSection::default(), &environment)
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBSCOUT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(content).context("Invalid configuration")?;
        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };
        Ok(Self::from_section(section, environment))
    }

    fn from_section(section: EnvironmentSection, environment: &str) -> Self {
        Self {
            environment: environment.to_string(),
            store: section.store,
            cache: section.cache,
            listings: section.listings,
        }
    }

    /// Environment values win over the file. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = get("SUPABASE_URL") {
            self.store.url = Some(url);
        }
        if let Some(key) = get("SUPABASE_ANON_KEY") {
            self.store.api_key = Some(key);
        }
        if let Some(table) = get("JOBSCOUT_JOBS_TABLE") {
            self.store.table = table;
        }
        if let Some(file) = get("JOBSCOUT_JOBS_FILE") {
            self.store.jobs_file = Some(PathBuf::from(file));
        }
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            stale_after: Duration::from_secs(self.cache.stale_seconds),
            retries: self.cache.retries,
            retry_base_delay: Duration::from_millis(self.cache.retry_base_delay_ms),
            ..CachePolicy::default()
        }
    }

    /// Listing query pre-filled from the configured defaults
    pub fn default_query(&self) -> ListingQuery {
        ListingQuery::default()
            .with_source(&self.listings.source)
            .with_sort(SortKey::parse(&self.listings.sort), self.listings.direction)
            .with_salary_ordering(self.listings.salary_ordering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SourceFilter;
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
local:
  store:
    jobs_file: fixtures/jobs.json
  cache:
    stale_seconds: 120
production:
  store:
    url: https://example.supabase.co
    table: job_postings
    timeout_seconds: 10
  cache:
    retries: 5
  listings:
    sort: date
    direction: asc
    source: indeed
    salary_ordering: lower_bound
"#;

    #[test]
    fn test_local_section_with_defaults() {
        let config = ConfigManager::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(config.store.jobs_file, Some(PathBuf::from("fixtures/jobs.json")));
        assert_eq!(config.store.table, "jobs");
        assert_eq!(config.cache.stale_seconds, 120);
        assert_eq!(config.cache.retries, 3);
        assert_eq!(config.listings, ListingDefaults::default());
    }

    #[test]
    fn test_production_section() {
        let config = ConfigManager::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(config.store.url.as_deref(), Some("https://example.supabase.co"));
        assert_eq!(config.store.table, "job_postings");
        assert_eq!(config.store.timeout_seconds, 10);
        assert_eq!(config.cache_policy().retries, 5);

        let query = config.default_query();
        assert_eq!(query.sort, SortKey::Date);
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.source, SourceFilter::Matching("indeed".into()));
        assert_eq!(query.salary_ordering, SalaryOrdering::LowerBound);
    }

    #[test]
    fn test_unknown_environment_uses_local() {
        let config = ConfigManager::from_yaml(SAMPLE, "staging").unwrap();
        assert_eq!(config.environment, "staging");
        assert_eq!(config.cache.stale_seconds, 120);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigManager::from_yaml(SAMPLE, "production").unwrap();
        let env: HashMap<&str, &str> = [
            ("SUPABASE_URL", "https://other.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon-key"),
            ("JOBSCOUT_JOBS_TABLE", "  "),
        ]
        .into_iter()
        .collect();

        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.store.url.as_deref(), Some("https://other.supabase.co"));
        assert_eq!(config.store.api_key.as_deref(), Some("anon-key"));
        assert_eq!(config.store.table, "job_postings");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = ConfigManager::load_from(Path::new("does/not/exist.yaml")).unwrap();
        assert!(!config.store.table.is_empty());
        assert_eq!(config.cache_policy().retry_base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(ConfigManager::from_yaml("local: [unclosed", "local").is_err());
    }
}
