//! Contributor collector
//!
//! Discovers everyone who authored a commit in an organization's repositories
//! within a date range.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::app::pagination::Paginator;
use crate::app::retry::RetryingFetcher;
use crate::domain::entities::{CommitRange, ContributorRecord, RepositoryRef};
use crate::domain::ports::{GitHubClient, PageCursor, RecordSink, Sleeper};
use crate::error::AppError;

/// Service collecting the set of commit authors of an organization
pub struct ContributorCollector<GC, S>
where
    GC: GitHubClient,
    S: Sleeper,
{
    github: Arc<GC>,
    fetcher: RetryingFetcher<S>,
    range: CommitRange,
}

impl<GC, S> ContributorCollector<GC, S>
where
    GC: GitHubClient,
    S: Sleeper,
{
    pub fn new(github: Arc<GC>, fetcher: RetryingFetcher<S>, range: CommitRange) -> Self {
        Self {
            github,
            fetcher,
            range,
        }
    }

    /// All repositories of `org`.
    ///
    /// If a page cannot be fetched the repositories listed so far are kept.
    pub async fn repositories(&self, org: &str) -> Vec<RepositoryRef> {
        let github = &*self.github;
        let fetcher = &self.fetcher;
        let mut pages = Paginator::new(PageCursor::Start, move |cursor: PageCursor| async move {
            fetcher
                .fetch("list_org_repositories", || {
                    github.list_org_repositories(org, cursor.clone())
                })
                .await
                .into_result()
        });

        let mut repositories = Vec::new();
        while let Some(page) = pages.next_page().await {
            match page {
                Ok(items) => repositories.extend(items),
                Err(e) => {
                    tracing::warn!(
                        org,
                        listed = repositories.len(),
                        error = %e,
                        "Could not list remaining repositories"
                    );
                    break;
                }
            }
        }
        repositories
    }

    /// Add the authors of `org/repo`'s commits to `contributors`.
    ///
    /// Commits without a linked account are skipped. When a page cannot be
    /// fetched the rest of the repository is abandoned, keeping what was
    /// collected. Returns the number of commits seen.
    pub async fn collect_repository(
        &self,
        org: &str,
        repo: &str,
        contributors: &mut BTreeSet<String>,
    ) -> usize {
        let github = &*self.github;
        let fetcher = &self.fetcher;
        let range = &self.range;
        let mut pages = Paginator::new(PageCursor::Start, move |cursor: PageCursor| async move {
            fetcher
                .fetch("list_commits", || {
                    github.list_commits(org, repo, range, cursor.clone())
                })
                .await
                .into_result()
        });

        let mut commits = 0;
        while let Some(page) = pages.next_page().await {
            match page {
                Ok(items) => {
                    commits += items.len();
                    contributors.extend(items.into_iter().filter_map(|c| c.author_identity));
                }
                Err(e) => {
                    tracing::warn!(
                        org,
                        repo,
                        pages = pages.pages_fetched() - 1,
                        error = %e,
                        "Skipping the rest of the repository"
                    );
                    break;
                }
            }
        }
        commits
    }

    /// Authors of every repository of `org`, deduplicated
    pub async fn collect(&self, org: &str) -> BTreeSet<String> {
        let repositories = self.repositories(org).await;
        tracing::info!(org, repositories = repositories.len(), "Listing commits");

        let mut contributors = BTreeSet::new();
        for repository in &repositories {
            tracing::info!(org, repo = %repository.name, "Processing repository");
            let before = contributors.len();
            let commits = self
                .collect_repository(org, &repository.name, &mut contributors)
                .await;
            tracing::debug!(
                repo = %repository.name,
                commits,
                new_contributors = contributors.len() - before,
                "Repository done"
            );
        }

        contributors
    }

    /// Collect the authors of `org` and write one record per login.
    ///
    /// Returns the number of records written.
    pub async fn export<K>(&self, org: &str, sink: &mut K) -> Result<usize, AppError>
    where
        K: RecordSink<ContributorRecord>,
    {
        let contributors = self.collect(org).await;
        for identity in &contributors {
            sink.append(&ContributorRecord {
                identity: identity.clone(),
            })?;
        }

        tracing::info!(org, contributors = contributors.len(), "Contributors saved");
        Ok(contributors.len())
    }
}
