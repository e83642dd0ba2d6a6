//! GitHub API client implementation
//!
//! Contributions and repository profiles come from the GraphQL endpoint;
//! organization repositories and commits from the paginated REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use urlencoding::encode;

use super::graphql::{
    ContributionsUser, ContributionsVariables, GraphQlRequest, GraphQlResponse,
    RepositoriesUser, UserData, UserVariables, CONTRIBUTIONS_QUERY, REPOSITORIES_QUERY,
};
use super::link::next_link;
use crate::domain::entities::{CommitRange, CommitRecord, ContributionWindow, RepositoryRef};
use crate::domain::ports::{
    ContributionCollection, GitHubClient, Page, PageCursor, RepositoryOverview,
};
use crate::error::GitHubError;

const PER_PAGE: &str = "100";
const API_VERSION: &str = "2022-11-28";

/// Implementation of the GitHub API client
pub struct GitHubClientImpl {
    http: Client,
    api_url: String,
    token: String,
}

impl GitHubClientImpl {
    pub fn new(api_url: String, token: String, timeout: Duration) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("contrib-census"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GitHubError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GitHubError::Deserialization(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(GitHubError::Unauthorized)
        } else if status == StatusCode::TOO_MANY_REQUESTS || rate_limit_exhausted(&response) {
            Err(GitHubError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }

    async fn graphql<V, T>(&self, query: &str, variables: V) -> Result<GraphQlResponse<T>, GitHubError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.api_url("/graphql"))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch one REST page and the locator of the page after it
    async fn get_page<W, T>(&self, request: RequestBuilder) -> Result<Page<T>, GitHubError>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let response = request.send().await?;
        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(next_link)
            .map(PageCursor::Next);

        let items: Vec<W> = self.handle_response(response).await?;

        Ok(Page {
            items: items.into_iter().map(T::from).collect(),
            next,
        })
    }

    fn org_repositories_request(&self, org: &str, cursor: PageCursor) -> RequestBuilder {
        match cursor {
            PageCursor::Start => self
                .get(&self.api_url(&format!("/orgs/{}/repos", encode(org))))
                .query(&[("per_page", PER_PAGE)]),
            PageCursor::Next(url) => self.get(&url),
        }
    }

    fn commits_request(
        &self,
        org: &str,
        repo: &str,
        range: &CommitRange,
        cursor: PageCursor,
    ) -> RequestBuilder {
        match cursor {
            PageCursor::Start => self
                .get(&self.api_url(&format!(
                    "/repos/{}/{}/commits",
                    encode(org),
                    encode(repo)
                )))
                .query(&[
                    ("since", timestamp(&range.since)),
                    ("until", timestamp(&range.until)),
                    ("per_page", PER_PAGE.to_string()),
                ]),
            PageCursor::Next(url) => self.get(&url),
        }
    }
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A 403 is a rate limit when the remaining quota header reads zero
fn rate_limit_exhausted(response: &reqwest::Response) -> bool {
    response.status() == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim() == "0")
            .unwrap_or(false)
}

/// Response types for the REST API
#[derive(Deserialize)]
struct RepositoryResponse {
    name: String,
}

impl From<RepositoryResponse> for RepositoryRef {
    fn from(r: RepositoryResponse) -> Self {
        RepositoryRef { name: r.name }
    }
}

#[derive(Deserialize)]
struct CommitResponse {
    /// Null when the commit email is not linked to an account
    author: Option<AccountResponse>,
}

#[derive(Deserialize)]
struct AccountResponse {
    login: String,
}

impl From<CommitResponse> for CommitRecord {
    fn from(c: CommitResponse) -> Self {
        CommitRecord {
            author_identity: c.author.map(|a| a.login),
        }
    }
}

#[async_trait]
impl GitHubClient for GitHubClientImpl {
    async fn contributions(
        &self,
        login: &str,
        window: &ContributionWindow,
    ) -> Result<ContributionCollection, GitHubError> {
        let variables = ContributionsVariables {
            user: login,
            from: timestamp(&window.from),
            to: timestamp(&window.to),
        };
        let response: GraphQlResponse<UserData<ContributionsUser>> =
            self.graphql(CONTRIBUTIONS_QUERY, variables).await?;

        Ok(response.into_user(login)?.contributions_collection.into())
    }

    async fn repository_overview(&self, login: &str) -> Result<RepositoryOverview, GitHubError> {
        let response: GraphQlResponse<UserData<RepositoriesUser>> = self
            .graphql(REPOSITORIES_QUERY, UserVariables { user: login })
            .await?;

        Ok(response.into_user(login)?.repositories.into())
    }

    async fn list_org_repositories(
        &self,
        org: &str,
        cursor: PageCursor,
    ) -> Result<Page<RepositoryRef>, GitHubError> {
        self.get_page::<RepositoryResponse, _>(self.org_repositories_request(org, cursor))
            .await
    }

    async fn list_commits(
        &self,
        org: &str,
        repo: &str,
        range: &CommitRange,
        cursor: PageCursor,
    ) -> Result<Page<CommitRecord>, GitHubError> {
        self.get_page::<CommitResponse, _>(self.commits_request(org, repo, range, cursor))
            .await
    }
}
