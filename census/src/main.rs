//! contrib-census
//!
//! Collects contribution statistics from GitHub: per-user yearly summaries and
//! the set of commit authors of an organization.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod cli;
mod config;
mod domain;
mod error;

#[cfg(test)]
mod test_utils;


use adapters::{read_identities, CsvRecordSink, GitHubClientImpl, SystemClock, TokioSleeper};
use app::{ContributorCollector, RetryPolicy, RetryingFetcher, SummaryService, YearlyAggregator};
use cli::{Cli, Commands};
use config::Config;
use domain::entities::{CommitRange, ContributorRecord, SummaryRecord};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,contrib_census=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(?config, "Configuration loaded");

    // Create adapters
    let github = Arc::new(
        GitHubClientImpl::new(
            config.github_api_url.clone(),
            config.github_token.clone(),
            config.http_timeout,
        )
        .context("Failed to build GitHub client")?,
    );
    let fetcher = RetryingFetcher::new(
        RetryPolicy::new(config.retry_limit, config.retry_delay),
        Arc::new(TokioSleeper),
    );

    match cli.command {
        Commands::Users {
            input,
            output,
            skip_header,
        } => {
            let identities = read_identities(&input, skip_header)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            tracing::info!(count = identities.len(), "Loaded identities");

            let mut sink = CsvRecordSink::<SummaryRecord>::create(&output)
                .with_context(|| format!("Failed to open {}", output.display()))?;

            let service = SummaryService::new(YearlyAggregator::new(
                github,
                fetcher,
                Arc::new(SystemClock),
                config.start_year,
            ));
            let report = service
                .run(&identities, &mut sink)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            tracing::info!(
                written = report.written,
                skipped = report.skipped.len(),
                "Finished summarizing users"
            );
            if !report.skipped.is_empty() {
                tracing::warn!(skipped = ?report.skipped, "Some users were left out of the output");
            }
        }
        Commands::Contributors {
            org,
            since,
            until,
            output,
        } => {
            let range = CommitRange::new(since, until).map_err(anyhow::Error::msg)?;

            let mut sink = CsvRecordSink::<ContributorRecord>::create(&output)
                .with_context(|| format!("Failed to open {}", output.display()))?;

            let collector = ContributorCollector::new(github, fetcher, range);
            let written = collector
                .export(&org, &mut sink)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;

            tracing::info!(org = %org, contributors = written, "Finished collecting contributors");
        }
    }

    Ok(())
}
