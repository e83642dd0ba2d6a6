use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

/// First calendar year queried for a user's contribution history
pub const DEFAULT_START_YEAR: i32 = 2017;

/// Retries after the first failed attempt of a request
pub const DEFAULT_RETRY_LIMIT: u32 = 2;

/// Seconds to wait between attempts of a request
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// Per-request transport timeout
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    /// Bearer token attached to every GitHub request
    pub github_token: String,
    pub github_api_url: String,
    pub start_year: i32,
    pub retry_limit: u32,
    pub retry_delay: Duration,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &"<redacted>")
            .field("github_api_url", &self.github_api_url)
            .field("start_year", &self.start_year)
            .field("retry_limit", &self.retry_limit)
            .field("retry_delay", &self.retry_delay)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let github_token = env::var("GITHUB_TOKEN")
            .map_err(|_| AppError::Config("GITHUB_TOKEN must be set".to_string()))?;
        if github_token.trim().is_empty() {
            return Err(AppError::Config("GITHUB_TOKEN is empty".to_string()));
        }

        Ok(Self {
            github_token,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            start_year: parse_var("CENSUS_START_YEAR", DEFAULT_START_YEAR)?,
            retry_limit: parse_var("CENSUS_RETRY_LIMIT", DEFAULT_RETRY_LIMIT)?,
            retry_delay: Duration::from_secs(parse_var(
                "CENSUS_RETRY_DELAY_SECS",
                DEFAULT_RETRY_DELAY_SECS,
            )?),
            http_timeout: Duration::from_secs(parse_var(
                "CENSUS_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", name, raw)))
}
