// src/core/mod.rs
//! Data access: configuration, job sources and the fetch cache

pub mod config_manager;
pub mod job_source;
pub mod query_cache;
pub mod service_client;

pub use config_manager::{ConfigManager, CONFIG_FILE};
pub use job_source::{FileJobSource, JobFeed, JobSource};
pub use query_cache::{CachePolicy, JobQueryCache};
pub use service_client::ServiceClient;
