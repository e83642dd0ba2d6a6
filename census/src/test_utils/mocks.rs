//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::domain::entities::{
    CommitRange, CommitRecord, ContributionWindow, RepositoryRef, TabularRecord,
};
use crate::domain::ports::{
    Clock, ContributionCollection, GitHubClient, Page, PageCursor, RecordSink,
    RepositoryOverview, Sleeper,
};
use crate::error::{GitHubError, SinkError};

// ============================================================================
// Mock GitHub Client
// ============================================================================

type WindowKey = (String, i32);
type RepoKey = (String, String);
type CommitPageKey = (String, String, usize);

fn bad_gateway() -> GitHubError {
    GitHubError::Api {
        status: 502,
        message: "Mock failure".to_string(),
    }
}

/// Index of the page a cursor points at; pages after the first are `Next("<index>")`
fn page_index(cursor: &PageCursor) -> usize {
    match cursor {
        PageCursor::Start => 0,
        PageCursor::Next(locator) => locator.parse().unwrap_or(usize::MAX),
    }
}

fn page_of<T: Clone>(pages: &[Vec<T>], index: usize) -> Page<T> {
    let items = pages.get(index).cloned().unwrap_or_default();
    let following = index.saturating_add(1);
    let next = (following < pages.len()).then(|| PageCursor::Next(following.to_string()));
    Page { items, next }
}

/// GitHub client serving canned responses
///
/// Logins and organizations without configured data look empty: no
/// contributions, no repositories, no commits.
#[derive(Default)]
pub struct MockGitHubClient {
    contributions: Arc<RwLock<HashMap<WindowKey, ContributionCollection>>>,
    overviews: Arc<RwLock<HashMap<String, RepositoryOverview>>>,
    failing_windows: Arc<RwLock<HashSet<WindowKey>>>,
    unknown_users: Arc<RwLock<HashSet<String>>>,
    missing_users: Arc<RwLock<HashSet<String>>>,
    repositories: Arc<RwLock<HashMap<String, Vec<Vec<RepositoryRef>>>>>,
    failing_repository_pages: Arc<RwLock<HashSet<(String, usize)>>>,
    commits: Arc<RwLock<HashMap<RepoKey, Vec<Vec<CommitRecord>>>>>,
    failing_commit_pages: Arc<RwLock<HashSet<CommitPageKey>>>,
    /// Years requested per login, in call order
    contribution_calls: Arc<RwLock<HashMap<String, Vec<i32>>>>,
    /// Commit page indexes requested per repository, in call order
    commit_page_calls: Arc<RwLock<HashMap<RepoKey, Vec<usize>>>>,
}

impl MockGitHubClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the collection returned for one login and year
    pub fn with_contributions(self, login: &str, year: i32, collection: ContributionCollection) -> Self {
        self.contributions
            .write()
            .unwrap()
            .insert((login.to_string(), year), collection);
        self
    }

    pub fn with_overview(self, login: &str, overview: RepositoryOverview) -> Self {
        self.overviews
            .write()
            .unwrap()
            .insert(login.to_string(), overview);
        self
    }

    /// Make every request for this window fail with a server error
    pub fn failing_window(self, login: &str, year: i32) -> Self {
        self.failing_windows
            .write()
            .unwrap()
            .insert((login.to_string(), year));
        self
    }

    /// Answer every query about `login` with `UserNotFound`
    pub fn with_unknown_user(self, login: &str) -> Self {
        self.unknown_users.write().unwrap().insert(login.to_string());
        self
    }

    /// Answer every query about `login` with a response lacking the user node
    pub fn with_missing_user(self, login: &str) -> Self {
        self.missing_users.write().unwrap().insert(login.to_string());
        self
    }

    /// Configure the repository listing of `org`, one slice per page
    pub fn with_repositories(self, org: &str, pages: &[&[&str]]) -> Self {
        let pages = pages
            .iter()
            .map(|page| {
                page.iter()
                    .map(|name| RepositoryRef {
                        name: name.to_string(),
                    })
                    .collect()
            })
            .collect();
        self.repositories
            .write()
            .unwrap()
            .insert(org.to_string(), pages);
        self
    }

    pub fn failing_repository_page(self, org: &str, page: usize) -> Self {
        self.failing_repository_pages
            .write()
            .unwrap()
            .insert((org.to_string(), page));
        self
    }

    /// Configure the commits of `org/repo`, one slice of author logins per page
    pub fn with_commits(self, org: &str, repo: &str, pages: &[&[Option<&str>]]) -> Self {
        let pages = pages
            .iter()
            .map(|page| {
                page.iter()
                    .map(|author| CommitRecord {
                        author_identity: author.map(str::to_string),
                    })
                    .collect()
            })
            .collect();
        self.commits
            .write()
            .unwrap()
            .insert((org.to_string(), repo.to_string()), pages);
        self
    }

    pub fn failing_commit_page(self, org: &str, repo: &str, page: usize) -> Self {
        self.failing_commit_pages
            .write()
            .unwrap()
            .insert((org.to_string(), repo.to_string(), page));
        self
    }

    pub fn contribution_calls(&self, login: &str) -> Vec<i32> {
        self.contribution_calls
            .read()
            .unwrap()
            .get(login)
            .cloned()
            .unwrap_or_default()
    }

    pub fn commit_page_calls(&self, org: &str, repo: &str) -> Vec<usize> {
        self.commit_page_calls
            .read()
            .unwrap()
            .get(&(org.to_string(), repo.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn check_user(&self, login: &str) -> Result<(), GitHubError> {
        if self.unknown_users.read().unwrap().contains(login) {
            return Err(GitHubError::UserNotFound(login.to_string()));
        }
        if self.missing_users.read().unwrap().contains(login) {
            return Err(GitHubError::MissingData(format!("user node for {}", login)));
        }
        Ok(())
    }
}

#[async_trait]
impl GitHubClient for MockGitHubClient {
    async fn contributions(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionCollection, GitHubError> {
        self.contribution_calls
            .write()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push(window.year);

        self.check_user(login)?;

        let key = (login.to_string(), window.year);
        if self.failing_windows.read().unwrap().contains(&key) {
            return Err(bad_gateway());
        }

        Ok(self
            .contributions
            .read()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_default())
    }

    async fn repository_overview(&self, login: &str) -> Result<RepositoryOverview, GitHubError> {
        self.check_user(login)?;

        Ok(self
            .overviews
            .read()
            .unwrap()
            .get(login)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_org_repositories(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Page<RepositoryRef>, GitHubError> {
        let index = page_index(&cursor);
        if self
            .failing_repository_pages
            .read()
            .unwrap()
            .contains(&(org.to_string(), index))
        {
            return Err(bad_gateway());
        }

        let repositories = self.repositories.read().unwrap();
        Ok(repositories
            .get(org)
            .map(|pages| page_of(pages, index))
            .unwrap_or_else(|| Page::last(Vec::new())))
    }

    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        _range: &CommitRange,
        cursor: PageCursor,
    ) -> Result<Page<CommitRecord>, GitHubError> {
        let index = page_index(&cursor);
        let key = (org.to_string(), repo.to_string());
        self.commit_page_calls
            .write()
            .unwrap()
            .entry(key.clone())
            .or_default()
            .push(index);

        if self
            .failing_commit_pages
            .read()
            .unwrap()
            .contains(&(org.to_string(), repo.to_string(), index))
        {
            return Err(bad_gateway());
        }

        let commits = self.commits.read().unwrap();
        Ok(commits
            .get(&key)
            .map(|pages| page_of(pages, index))
            .unwrap_or_else(|| Page::last(Vec::new())))
    }
}

// ============================================================================
// Runtime
// ============================================================================

/// Sleeper that returns immediately and records what it was asked to wait
#[derive(Default)]
pub struct NoopSleeper {
    sleeps: Arc<RwLock<Vec<Duration>>>,
}

impl NoopSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.read().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for NoopSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.write().unwrap().push(duration);
    }
}

/// Clock frozen at one instant
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Mid-year of `year`
    pub fn at_year(year: i32) -> Self {
        Self(Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Record Sinks
// ============================================================================

/// Sink keeping appended records in memory
pub struct InMemorySink<R> {
    records: Vec<R>,
}

impl<R: Clone> InMemorySink<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: TabularRecord + Clone> RecordSink<R> for InMemorySink<R> {
    fn append(&mut self, record: &R) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// Sink whose every append fails
pub struct FailingSink;

impl<R: TabularRecord> RecordSink<R> for FailingSink {
    fn append(&mut self, _record: &R) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}
