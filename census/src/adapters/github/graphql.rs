//! GraphQL documents and response shapes
//!
//! Wire types mirror the GitHub schema field names and are converted into the
//! port types as soon as they are decoded.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::Category;
use crate::domain::ports::{ContributionCollection, ContributionDay, RepositoryOverview};
use crate::error::GitHubError;

pub const CONTRIBUTIONS_QUERY: &str = r#"
query($user: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $user) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
      commitContributionsByRepository(maxRepositories: 100) {
        contributions(first: 100) {
          totalCount
        }
      }
      pullRequestContributionsByRepository(maxRepositories: 100) {
        contributions(first: 100) {
          totalCount
        }
      }
      issueContributionsByRepository(maxRepositories: 100) {
        contributions(first: 100) {
          totalCount
        }
      }
      pullRequestReviewContributionsByRepository(maxRepositories: 100) {
        contributions(first: 100) {
          totalCount
        }
      }
    }
  }
}
"#;

pub const REPOSITORIES_QUERY: &str = r#"
query($user: String!) {
  user(login: $user) {
    repositories(first: 100) {
      totalCount
      nodes {
        primaryLanguage {
          name
        }
      }
    }
  }
}
"#;

/// Helper to deserialize null as default (empty vec, etc.)
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Serialize)]
pub struct ContributionsVariables<'a> {
    pub user: &'a str,
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct UserVariables<'a> {
    pub user: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserData<T> {
    pub user: Option<T>,
}

impl<T> GraphQlResponse<T> {
    fn has_error_kind(&self, kind: &str) -> bool {
        self.errors.iter().any(|e| e.kind.as_deref() == Some(kind))
    }
}

impl<T> GraphQlResponse<UserData<T>> {
    /// The `user` node of the response.
    ///
    /// A `NOT_FOUND` error means the login does not exist and a `RATE_LIMITED`
    /// error is reported like an HTTP rate limit; any other error is a query
    /// failure. A null user without errors is reported as missing
    /// data, since the API gave no reason for it.
    pub fn into_user(self, login: &str) -> Result<T, GitHubError> {
        if !self.errors.is_empty() {
            if self.has_error_kind("NOT_FOUND") {
                return Err(GitHubError::UserNotFound(login.to_string()));
            }
            if self.has_error_kind("RATE_LIMITED") {
                return Err(GitHubError::RateLimited);
            }
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(GitHubError::Query(messages.join("; ")));
        }

        self.data
            .and_then(|d| d.user)
            .ok_or_else(|| GitHubError::MissingData(format!("user node for {}", login)))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsUser {
    pub contributions_collection: CollectionWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionWire {
    pub contribution_calendar: CalendarWire,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub commit_contributions_by_repository: Vec<RepositoryContributionsWire>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub pull_request_contributions_by_repository: Vec<RepositoryContributionsWire>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub issue_contributions_by_repository: Vec<RepositoryContributionsWire>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub pull_request_review_contributions_by_repository: Vec<RepositoryContributionsWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWire {
    pub total_contributions: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub weeks: Vec<WeekWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekWire {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub contribution_days: Vec<DayWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayWire {
    pub date: NaiveDate,
    pub contribution_count: u64,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryContributionsWire {
    pub contributions: CountWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountWire {
    pub total_count: u64,
}

fn repository_counts(wire: Vec<RepositoryContributionsWire>) -> Vec<u64> {
    wire.into_iter()
        .map(|r| r.contributions.total_count)
        .collect()
}

impl From<CollectionWire> for ContributionCollection {
    fn from(w: CollectionWire) -> Self {
        let days = w
            .contribution_calendar
            .weeks
            .into_iter()
            .flat_map(|week| week.contribution_days)
            .map(|d| ContributionDay {
                date: d.date,
                count: d.contribution_count,
            })
            .collect();

        let mut per_repository = BTreeMap::new();
        per_repository.insert(
            Category::Commits,
            repository_counts(w.commit_contributions_by_repository),
        );
        per_repository.insert(
            Category::PullRequests,
            repository_counts(w.pull_request_contributions_by_repository),
        );
        per_repository.insert(
            Category::Issues,
            repository_counts(w.issue_contributions_by_repository),
        );
        per_repository.insert(
            Category::Reviews,
            repository_counts(w.pull_request_review_contributions_by_repository),
        );

        ContributionCollection {
            total: w.contribution_calendar.total_contributions,
            days,
            per_repository,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RepositoriesUser {
    pub repositories: RepositoryConnectionWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConnectionWire {
    pub total_count: u64,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub nodes: Vec<Option<RepositoryNodeWire>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryNodeWire {
    pub primary_language: Option<LanguageWire>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageWire {
    pub name: Option<String>,
}

impl From<RepositoryConnectionWire> for RepositoryOverview {
    fn from(w: RepositoryConnectionWire) -> Self {
        RepositoryOverview {
            total_count: w.total_count,
            primary_languages: w
                .nodes
                .into_iter()
                .map(|node| node.and_then(|n| n.primary_language).and_then(|l| l.name))
                .collect(),
        }
    }
}
