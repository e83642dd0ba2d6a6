//! Unified error types for contrib-census
//!
//! This module defines error types for each layer:
//! - `GitHubError`: GitHub API client errors
//! - `SinkError`: Tabular output errors
//! - `AppError`: Application layer errors (wraps the others for the CLI)

use thiserror::Error;

/// GitHub API client errors
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("GraphQL query failed: {0}")]
    Query(String),

    #[error("Response is missing {0}")]
    MissingData(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized - invalid token")]
    Unauthorized,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl GitHubError {
    /// Whether a later attempt of the same request may succeed.
    ///
    /// Transport failures, rate limiting and server-side errors are transient.
    /// Anything the API rejected on its merits (unknown user, query errors,
    /// malformed payloads, other 4xx) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            GitHubError::Request(_) | GitHubError::RateLimited => true,
            GitHubError::Api { status, .. } => *status >= 500 || *status == 429,
            GitHubError::UserNotFound(_)
            | GitHubError::Query(_)
            | GitHubError::MissingData(_)
            | GitHubError::Unauthorized
            | GitHubError::Deserialization(_) => false,
        }
    }
}

/// Tabular output errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Could not encode cell: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Application layer errors - surfaced to the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
