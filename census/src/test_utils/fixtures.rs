//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::entities::{Category, CommitRange};
use crate::domain::ports::{ContributionCollection, ContributionDay, RepositoryOverview};

/// A window's collection with one repository per category.
///
/// The whole total lands on January 15th of `year`, so the calendar and the
/// category breakdown agree.
pub fn collection(year: i32, counts: &[(Category, u64)]) -> ContributionCollection {
    let total: u64 = counts.iter().map(|(_, count)| count).sum();
    let day = NaiveDate::from_ymd_opt(year, 1, 15).unwrap();

    ContributionCollection {
        total,
        days: vec![ContributionDay { date: day, count: total }],
        per_repository: counts
            .iter()
            .map(|(category, count)| (*category, vec![*count]))
            .collect(),
    }
}

/// A collection built from explicit calendar days and per-repository counts
pub fn collection_with_days(
    total: u64,
    days: &[(NaiveDate, u64)],
    per_repository: &[(Category, Vec<u64>)],
) -> ContributionCollection {
    ContributionCollection {
        total,
        days: days
            .iter()
            .map(|(date, count)| ContributionDay {
                date: *date,
                count: *count,
            })
            .collect(),
        per_repository: per_repository.iter().cloned().collect::<BTreeMap<_, _>>(),
    }
}

pub fn overview(total_count: u64, languages: &[Option<&str>]) -> RepositoryOverview {
    RepositoryOverview {
        total_count,
        primary_languages: languages.iter().map(|l| l.map(str::to_string)).collect(),
    }
}

/// Calendar year 2020
pub fn test_range() -> CommitRange {
    CommitRange::new(
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2020, 12, 31, 23, 59, 59).unwrap(),
    )
    .unwrap()
}
