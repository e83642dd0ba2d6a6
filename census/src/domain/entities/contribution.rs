//! Contribution domain entities
//!
//! Yearly query windows, the partial result fetched for one window, and the
//! per-user summary those partials fold into.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use super::repository::RepositoryProfile;

/// Contribution counts keyed by `YYYY-MM`
pub type MonthlyCounts = BTreeMap<String, u64>;

/// Contribution counts keyed by kind
pub type CategoryCounts = BTreeMap<Category, u64>;

/// Kind of contribution reported by the contributions collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Commits,
    PullRequests,
    Issues,
    Reviews,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Commits,
        Category::PullRequests,
        Category::Issues,
        Category::Reviews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Commits => "commits",
            Category::PullRequests => "pull_requests",
            Category::Issues => "issues",
            Category::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bucket key for a calendar day
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// One calendar year, first second to last second, in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContributionWindow {
    pub year: i32,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ContributionWindow {
    pub fn for_year(year: i32) -> Option<Self> {
        let from = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()?;
        let to = Utc.with_ymd_and_hms(year, 12, 31, 23, 59, 59).single()?;
        Some(Self { year, from, to })
    }

    /// Every window from `start_year` through the year of `now`, inclusive.
    ///
    /// Empty when `start_year` lies in the future.
    pub fn span(start_year: i32, now: DateTime<Utc>) -> Vec<Self> {
        (start_year..=now.year())
            .filter_map(Self::for_year)
            .collect()
    }
}

/// Counts fetched for a single window
///
/// Forms a commutative monoid under [`PartialContribution::merge`] with
/// [`PartialContribution::zero`] as identity. Missing map keys count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialContribution {
    pub count: u64,
    pub monthly: MonthlyCounts,
    pub by_category: CategoryCounts,
}

impl PartialContribution {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.count += other.count;
        for (month, value) in other.monthly {
            *self.monthly.entry(month).or_insert(0) += value;
        }
        for (category, value) in other.by_category {
            *self.by_category.entry(category).or_insert(0) += value;
        }
        self
    }

    pub fn monthly_total(&self) -> u64 {
        self.monthly.values().sum()
    }
}

/// Everything known about one identity after all windows were folded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub identity: String,
    pub total_contributions: u64,
    pub repository_count: u64,
    pub primary_language: String,
    pub monthly: MonthlyCounts,
    pub by_category: CategoryCounts,
}

impl UserSummary {
    pub fn new(identity: &str, totals: PartialContribution, profile: RepositoryProfile) -> Self {
        Self {
            identity: identity.to_string(),
            total_contributions: totals.count,
            repository_count: profile.repository_count,
            primary_language: profile.primary_language,
            monthly: totals.monthly,
            by_category: totals.by_category,
        }
    }

    /// Total matches both the monthly and the per-category breakdown
    pub fn is_consistent(&self) -> bool {
        let monthly: u64 = self.monthly.values().sum();
        let categories: u64 = self.by_category.values().sum();
        self.total_contributions == monthly && self.total_contributions == categories
    }
}
