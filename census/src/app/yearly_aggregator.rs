//! Yearly aggregator
//!
//! Builds one user's summary by querying the contributions collection one
//! calendar year at a time and folding the yearly results together.

use std::sync::Arc;

use crate::app::retry::{FetchOutcome, RetryingFetcher};
use crate::domain::entities::{
    month_key, Category, ContributionWindow, PartialContribution, RepositoryProfile, UserSummary,
};
use crate::domain::ports::{Clock, ContributionCollection, GitHubClient, Sleeper};
use crate::error::{AppError, GitHubError};

/// Service producing a [`UserSummary`] per identity
pub struct YearlyAggregator<GC, S, C>
where
    GC: GitHubClient,
    S: Sleeper,
    C: Clock,
{
    github: Arc<GC>,
    fetcher: RetryingFetcher<S>,
    clock: Arc<C>,
    start_year: i32,
}

impl<GC, S, C> YearlyAggregator<GC, S, C>
where
    GC: GitHubClient,
    S: Sleeper,
    C: Clock,
{
    pub fn new(
        github: Arc<GC>,
        fetcher: RetryingFetcher<S>,
        clock: Arc<C>,
        start_year: i32,
    ) -> Self {
        Self {
            github,
            fetcher,
            clock,
            start_year,
        }
    }

    /// Windows queried for every user, start year through the current year
    pub fn windows(&self) -> Vec<ContributionWindow> {
        ContributionWindow::span(self.start_year, self.clock.now())
    }

    /// Summarize one identity.
    ///
    /// Windows that cannot be fetched count as zero. Only a response that is
    /// missing its target without saying the user does not exist fails the
    /// whole identity.
    pub async fn summarize(&self, login: &str) -> Result<UserSummary, AppError> {
        let mut totals = PartialContribution::zero();
        for window in self.windows() {
            let partial = self.fetch_window(login, &window).await?;
            totals = totals.merge(partial);
        }

        let profile = self.fetch_profile(login).await?;
        let summary = UserSummary::new(login, totals, profile);

        if !summary.is_consistent() {
            tracing::warn!(
                login,
                total = summary.total_contributions,
                by_category = summary.by_category.values().sum::<u64>(),
                "Category breakdown does not add up to the calendar total"
            );
        }

        Ok(summary)
    }

    async fn fetch_window(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<PartialContribution, AppError> {
        let outcome = self
            .fetcher
            .fetch("contributions", || self.github.contributions(login, window))
            .await;

        match outcome {
            FetchOutcome::Fetched(collection) => Ok(fold_collection(&collection)),
            FetchOutcome::Rejected(GitHubError::MissingData(what)) => {
                Err(GitHubError::MissingData(what).into())
            }
            FetchOutcome::Rejected(e) => {
                tracing::warn!(login, year = window.year, error = %e, "No contributions for window");
                Ok(PartialContribution::zero())
            }
            FetchOutcome::Exhausted { attempts, error } => {
                tracing::warn!(
                    login,
                    year = window.year,
                    attempts,
                    error = %error,
                    "Giving up on window, counting it as empty"
                );
                Ok(PartialContribution::zero())
            }
        }
    }

    async fn fetch_profile(&self, login: &str) -> Result<RepositoryProfile, AppError> {
        let outcome = self
            .fetcher
            .fetch("repository_overview", || self.github.repository_overview(login))
            .await;

        match outcome {
            FetchOutcome::Fetched(overview) => Ok(RepositoryProfile::from_languages(
                overview.total_count,
                overview.primary_languages,
            )),
            FetchOutcome::Rejected(GitHubError::MissingData(what)) => {
                Err(GitHubError::MissingData(what).into())
            }
            FetchOutcome::Rejected(error) | FetchOutcome::Exhausted { error, .. } => {
                tracing::warn!(login, error = %error, "No repository data for user");
                Ok(RepositoryProfile::unknown())
            }
        }
    }
}

/// Reduce one window's contributions collection to a partial result.
///
/// Daily counts are bucketed by month; every month present in the calendar
/// gets a key, zero months included. Categories without contributions are
/// left out.
pub fn fold_collection(collection: &ContributionCollection) -> PartialContribution {
    let mut partial = PartialContribution {
        count: collection.total,
        ..PartialContribution::zero()
    };

    for day in &collection.days {
        *partial.monthly.entry(month_key(day.date)).or_insert(0) += day.count;
    }

    for category in Category::ALL {
        let sum: u64 = collection
            .per_repository
            .get(&category)
            .map(|counts| counts.iter().sum())
            .unwrap_or(0);
        if sum > 0 {
            partial.by_category.insert(category, sum);
        }
    }

    let calendar_sum = partial.monthly_total();
    if calendar_sum != collection.total {
        tracing::debug!(
            reported = collection.total,
            calendar_sum,
            "Calendar days do not add up to the reported total"
        );
    }

    partial
}
