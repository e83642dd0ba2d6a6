//! Repository and commit entities

use chrono::{DateTime, Utc};

/// Shown when none of a user's repositories has a detected language
pub const NO_LANGUAGE: &str = "N/A";

/// A repository under an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub name: String,
}

/// A commit, reduced to the login of its author
///
/// Commits whose author email is not linked to an account carry no login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub author_identity: Option<String>,
}

/// Inclusive time range commits are listed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRange {
    pub since: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl CommitRange {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self, String> {
        if since > until {
            return Err(format!(
                "Range start {} is after range end {}",
                since.to_rfc3339(),
                until.to_rfc3339()
            ));
        }
        Ok(Self { since, until })
    }
}

/// Repository count and dominant language of a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryProfile {
    pub repository_count: u64,
    pub primary_language: String,
}

impl RepositoryProfile {
    /// Profile used when the user's repositories could not be fetched
    pub fn unknown() -> Self {
        Self {
            repository_count: 0,
            primary_language: NO_LANGUAGE.to_string(),
        }
    }

    pub fn from_languages<I, S>(repository_count: u64, languages: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        Self {
            repository_count,
            primary_language: primary_language(languages)
                .unwrap_or_else(|| NO_LANGUAGE.to_string()),
        }
    }
}

/// Language used as primary language by the most repositories.
///
/// Ties go to the language encountered first. Repositories without a
/// language (or with an empty name) are ignored.
pub fn primary_language<I, S>(languages: I) -> Option<String>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let mut tally: Vec<(String, u64)> = Vec::new();
    for language in languages.into_iter().flatten() {
        let language = language.as_ref();
        if language.is_empty() {
            continue;
        }
        match tally.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += 1,
            None => tally.push((language.to_string(), 1)),
        }
    }

    let mut best: Option<(String, u64)> = None;
    for (name, count) in tally {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((name, count));
        }
    }
    best.map(|(name, _)| name)
}
