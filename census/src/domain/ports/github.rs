//! GitHub client port trait
//!
//! Defines the interface for reading contribution data from GitHub. The
//! adapter owns transport, authentication and wire formats; these types are
//! the already-decoded shapes the application layer works with.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{
    Category, CommitRange, CommitRecord, ContributionWindow, RepositoryRef,
};
use crate::error::GitHubError;

/// Position in a paginated listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// The first page, built from the listing's own parameters
    Start,
    /// An opaque locator handed out by the previous page
    Next(String),
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, L = PageCursor> {
    pub items: Vec<T>,
    /// Locator of the following page, `None` on the last page
    pub next: Option<L>,
}

impl<T, L> Page<T, L> {
    #[cfg(test)]
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// A single day of the contribution calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub count: u64,
}

/// Contributions collection of one user for one window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionCollection {
    /// Calendar total as reported by the API
    pub total: u64,
    pub days: Vec<ContributionDay>,
    /// Per-repository contribution counts, by kind
    pub per_repository: BTreeMap<Category, Vec<u64>>,
}

/// The user's repository count and the primary language of the first page
/// of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryOverview {
    pub total_count: u64,
    pub primary_languages: Vec<Option<String>>,
}

/// Port trait for GitHub API operations
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Contributions collection of `login` restricted to `window`
    ///
    /// Fails with `GitHubError::UserNotFound` when the login does not resolve.
    async fn contributions(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionCollection, GitHubError>;

    /// Total repository count and the languages of the first 100 repositories
    async fn repository_overview(&self, login: &str) -> Result<RepositoryOverview, GitHubError>;

    /// One page of the repositories owned by an organization
    async fn list_org_repositories(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Page<RepositoryRef>, GitHubError>;

    /// One page of the commits of `org/repo` inside `range`
    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        range: &CommitRange,
        cursor: PageCursor,
    ) -> Result<Page<CommitRecord>, GitHubError>;
}
