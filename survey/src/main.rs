//! Survey entry point
//!
//! Runs the pronoun pipeline over every Oengus marathon in a date window and
//! prints the combined distribution as JSON.

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::time::Duration;

use pipeline::core::{combine_counts, view_from_counts};
use pipeline::services::{RealOengusSource, http};
use pipeline::{Endpoints, MarathonSummary, MarathonWindow, Pipeline, PipelineConfig, config};
use shared::{
    AggregateView, AggregationResult, Category, ProcessId, SourceKind, logging, process_info,
    process_warn,
};

#[derive(Parser, Debug)]
#[command(name = "survey")]
#[command(about = "Combined pronoun distribution across Oengus marathons in a date window")]
struct Args {
    /// First day of the window (YYYY-MM-DD)
    #[arg(long)]
    start: NaiveDate,

    /// Last day of the window (YYYY-MM-DD)
    #[arg(long)]
    end: NaiveDate,

    /// Time zone Oengus interprets the window in
    #[arg(long, default_value = "America/Chicago")]
    zone: String,

    /// Only survey marathons held in this language
    #[arg(long, default_value = "en")]
    language: String,

    /// Marathons processed at once
    #[arg(long, default_value = "5")]
    concurrency: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    request_timeout_secs: u64,

    #[arg(long, env = "MAX_CONCURRENT_LOOKUPS", default_value = "16")]
    max_concurrent_lookups: usize,

    #[arg(long, env = "OENGUS_API_URL", default_value = config::DEFAULT_OENGUS_API)]
    oengus_api: String,

    #[arg(long, env = "SPEEDRUN_API_URL", default_value = config::DEFAULT_SPEEDRUN_API)]
    speedrun_api: String,

    #[arg(long, env = "PRONOUNS_API_URL", default_value = config::DEFAULT_PRONOUNS_API)]
    pronouns_api: String,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let defaults = PipelineConfig::default();
        PipelineConfig {
            endpoints: Endpoints {
                oengus_api: self.oengus_api.clone(),
                speedrun_api: self.speedrun_api.clone(),
                pronouns_api: self.pronouns_api.clone(),
                ..defaults.endpoints
            },
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_concurrent_lookups: self.max_concurrent_lookups,
            ..defaults
        }
    }

    fn window(&self) -> anyhow::Result<MarathonWindow> {
        anyhow::ensure!(self.start <= self.end, "--start must not be after --end");

        Ok(MarathonWindow {
            start: self.start.and_time(NaiveTime::MIN).and_utc(),
            end: self.end.and_time(NaiveTime::MIN).and_utc(),
            zone_id: self.zone.clone(),
        })
    }
}

/// Combined distribution printed at the end of a survey
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SurveyReport {
    events_surveyed: usize,
    events_failed: usize,
    submissions: AggregateView,
    schedule: AggregateView,
}

fn relevant_marathons(listing: Vec<MarathonSummary>, language: &str) -> Vec<MarathonSummary> {
    listing
        .into_iter()
        .filter(|marathon| {
            marathon
                .language
                .as_deref()
                .is_some_and(|lang| lang.eq_ignore_ascii_case(language))
        })
        .collect()
}

/// Sum the base categories of every event; `notFound` is not carried over
fn combine(results: &[AggregationResult], events_failed: usize) -> SurveyReport {
    let submissions = combine_counts(results.iter().map(|r| &r.submissions), &Category::SUBMISSIONS);
    let schedule = combine_counts(
        results.iter().filter_map(|r| r.schedule.as_ref()),
        &Category::SUBMISSIONS,
    );

    SurveyReport {
        events_surveyed: results.len(),
        events_failed,
        submissions: view_from_counts(submissions),
        schedule: view_from_counts(schedule),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_survey();
    logging::init_tracing_with_level(Some(&args.log_level));

    let window = args.window()?;
    let config = args.pipeline_config();
    let pipeline = Pipeline::from_config(&config).context("building pipeline")?;

    let client = http::build_client(config.request_timeout)?;
    let oengus = RealOengusSource::new(client, &config.endpoints.oengus_api);

    logging::log_startup(
        ProcessId::current(),
        &format!("survey of {} to {} ({})", args.start, args.end, args.zone),
    );

    let listing = oengus
        .list_marathons(&window)
        .await
        .context("listing marathons")?;
    let total = listing.len();
    let marathons = relevant_marathons(listing, &args.language);

    process_info!(
        ProcessId::current(),
        "Found {} relevant events ({} total)",
        marathons.len(),
        total
    );

    let outcomes: Vec<Option<AggregationResult>> = stream::iter(marathons)
        .map(|marathon| {
            let pipeline = &pipeline;
            async move {
                process_info!(ProcessId::current(), "Calculating marathon {}", marathon.id);
                match pipeline.calculate(SourceKind::Oengus, &marathon.id).await {
                    Ok(result) => Some(result),
                    Err(e) => {
                        process_warn!(
                            ProcessId::current(),
                            error = %e,
                            "Skipping marathon {}",
                            marathon.id
                        );
                        None
                    }
                }
            }
        })
        .buffer_unordered(args.concurrency.max(1))
        .collect()
        .await;

    let events_failed = outcomes.iter().filter(|outcome| outcome.is_none()).count();
    let results: Vec<AggregationResult> = outcomes.into_iter().flatten().collect();

    let report = combine(&results, events_failed);
    println!("{}", serde_json::to_string_pretty(&report)?);

    logging::log_success(
        ProcessId::current(),
        &format!("Surveyed {} events", report.events_surveyed),
    );
    Ok(())
}
