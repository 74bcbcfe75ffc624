// src/cli.rs
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::actions::{perform_action, ActionOutcome, JobAction};
use crate::analytics::AnalyticsReport;
use crate::core::job_source::{FileJobSource, JobFeed};
use crate::core::{ConfigManager, ServiceClient, CONFIG_FILE};
use crate::dashboard::DashboardSummary;
use crate::pipeline::{ListingQuery, SortDirection, SortKey, SourceFilter};
use crate::service::JobBoard;
use crate::types::job::JobView;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Browse scraped job listings: search, filter, sort and summarise")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Read jobs from a JSON export instead of the hosted store
    #[arg(long, global = true)]
    pub jobs_file: Option<PathBuf>,

    /// Write JSON logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List jobs with optional search, source filter and sorting
    Listings {
        #[arg(long, default_value = "")]
        search: String,
        /// Source name, or "all"
        #[arg(long)]
        source: Option<String>,
        /// match, date or salary
        #[arg(long)]
        sort: Option<String>,
        /// asc or desc
        #[arg(long)]
        order: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Headline stats and the top matches
    Dashboard,
    /// Source, skill and location distributions
    Analytics {
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
    /// Print the link to apply for a job
    Apply { id: i64 },
    /// Fetch the job data again and report how many rows came back
    Refresh,
}

fn build_feed(config: &ConfigManager, jobs_file: Option<PathBuf>) -> Result<JobFeed> {
    match jobs_file.or_else(|| config.store.jobs_file.clone()) {
        Some(path) => {
            let source = FileJobSource::new(path);
            info!("Reading jobs from file: {}", source.path().display());
            Ok(JobFeed::File(source))
        }
        None => Ok(JobFeed::Remote(ServiceClient::from_config(&config.store)?)),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    let board = JobBoard::new(build_feed(&config, cli.jobs_file)?, config.cache_policy());
    let now = Utc::now();

    match cli.command {
        Command::Listings {
            search,
            source,
            sort,
            order,
            limit,
        } => {
            let mut query = config.default_query().with_search(&search).with_limit(limit);
            if let Some(source) = source {
                query.source = SourceFilter::parse(&source);
            }
            if let Some(sort) = sort {
                query.sort = SortKey::parse(&sort);
            }
            if let Some(order) = order {
                query.direction = SortDirection::parse(&order);
            }

            let response = board.listings(&query, now).await;
            if cli.json {
                print_json(&response)?;
            } else if response.success {
                print_listings(&response.jobs, response.total_jobs, &query);
            }
            if let Some(error) = response.error {
                anyhow::bail!("Error loading jobs: {}", error);
            }
        }

        Command::Dashboard => {
            let response = board.dashboard(now).await;
            if cli.json {
                print_json(&response)?;
            } else if let Some(summary) = &response.summary {
                print_dashboard(summary);
            }
            if let Some(error) = response.error {
                anyhow::bail!("Error loading dashboard data: {}", error);
            }
        }

        Command::Analytics { top } => {
            let response = board.analytics(top, now).await;
            if cli.json {
                print_json(&response)?;
            } else if let Some(report) = &response.report {
                print_analytics(report);
            }
            if let Some(error) = response.error {
                anyhow::bail!("Error loading analytics data: {}", error);
            }
        }

        Command::Apply { id } => {
            let Some(job) = board.find_job(id, now).await? else {
                anyhow::bail!("No job with id {}", id);
            };
            let outcome = perform_action(JobAction::Apply, &job, None);
            if cli.json {
                print_json(&outcome)?;
            } else {
                match outcome {
                    ActionOutcome::OpenLink(url) => println!("{}", url),
                    _ => println!("❌ No job link available for: {}", job.title),
                }
            }
        }

        Command::Refresh => {
            let count = board.refresh().await?;
            if cli.json {
                print_json(&serde_json::json!({ "success": true, "total_jobs": count }))?;
            } else {
                println!("✅ Refreshed job data: {} jobs", count);
            }
        }
    }

    Ok(())
}

fn print_listings(jobs: &[JobView], total: usize, query: &ListingQuery) {
    println!("Showing {} of {} jobs (sort: {:?} {:?})", jobs.len(), total, query.sort, query.direction);
    println!();

    if jobs.is_empty() {
        println!("No jobs found");
        println!("Try adjusting your search criteria or check back later");
        return;
    }

    for job in jobs {
        print_job(job);
    }
}

fn print_job(job: &JobView) {
    let badge = if job.is_new { " [NEW]" } else { "" };
    println!("{:>3}%  {}{}", job.match_score, job.title, badge);
    println!("      {} · {}", job.company, job.location);
    if let Some(salary) = &job.salary {
        println!("      💰 {}", salary);
    }
    if !job.tags.is_empty() {
        println!("      🏷  {}", job.tags.join(", "));
    }
    println!("      Source: {} · {} · id {}", job.source, job.posted_at, job.id);
    println!();
}

fn print_dashboard(summary: &DashboardSummary) {
    println!("=== Dashboard ===");
    println!("Last scrape: {}", summary.last_scrape);
    println!();
    println!(
        "Total Jobs Found  {:>6}   +{} new today",
        summary.total_jobs, summary.new_today
    );
    println!(
        "High Match Jobs   {:>6}   {}% of total",
        summary.high_match_jobs, summary.high_match_percent
    );
    println!(
        "New Jobs Today    {:>6}   In the last 24 hours",
        summary.new_today
    );
    println!();

    if summary.top_matches.is_empty() {
        println!("No job matches found yet");
        return;
    }

    println!("Recent Job Matches:");
    println!();
    for job in &summary.top_matches {
        print_job(job);
    }
}

fn print_analytics(report: &AnalyticsReport) {
    println!("=== Analytics ({} jobs) ===", report.total_jobs);
    println!("Average match score: {:.1}", report.average_match_score);

    let sections = [
        ("Jobs by source", &report.sources),
        ("Skills in demand", &report.skills),
        ("Top locations", &report.locations),
    ];
    for (title, entries) in sections {
        println!();
        println!("{}:", title);
        for entry in entries {
            println!("  {:<30} {:>5}", entry.name, entry.count);
        }
    }
}
