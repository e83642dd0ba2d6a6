//! Tabular records
//!
//! Flat, one-row-per-entity shapes written by a record sink. Map-valued fields
//! are rendered as a single JSON object per cell rather than spread over
//! columns.

use super::contribution::UserSummary;

/// A row with a fixed header
pub trait TabularRecord {
    /// Column names, written once at the top of the file
    fn header() -> &'static [&'static str];

    /// Cell values in header order
    fn cells(&self) -> Vec<String>;
}

/// One row of the per-user contributions file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub identity: String,
    pub total_contributions: u64,
    pub repository_count: u64,
    pub primary_language: String,
    pub monthly: String,
    pub by_category: String,
}

impl TryFrom<&UserSummary> for SummaryRecord {
    type Error = serde_json::Error;

    fn try_from(summary: &UserSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            identity: summary.identity.clone(),
            total_contributions: summary.total_contributions,
            repository_count: summary.repository_count,
            primary_language: summary.primary_language.clone(),
            monthly: serde_json::to_string(&summary.monthly)?,
            by_category: serde_json::to_string(&summary.by_category)?,
        })
    }
}

impl TabularRecord for SummaryRecord {
    fn header() -> &'static [&'static str] {
        &[
            "identity",
            "total_contributions",
            "repository_count",
            "primary_language",
            "monthly",
            "by_category",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.identity.clone(),
            self.total_contributions.to_string(),
            self.repository_count.to_string(),
            self.primary_language.clone(),
            self.monthly.clone(),
            self.by_category.clone(),
        ]
    }
}

/// One row of the organization contributors file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributorRecord {
    pub identity: String,
}

impl TabularRecord for ContributorRecord {
    fn header() -> &'static [&'static str] {
        &["identity"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.identity.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Category, PartialContribution, RepositoryProfile};

    #[test]
    fn summary_record_renders_maps_as_json_cells() {
        let totals = PartialContribution {
            count: 3,
            monthly: [("2017-01".to_string(), 1), ("2017-02".to_string(), 2)]
                .into_iter()
                .collect(),
            by_category: [(Category::Commits, 3)].into_iter().collect(),
        };
        let profile = RepositoryProfile {
            repository_count: 12,
            primary_language: "Rust".to_string(),
        };
        let summary = UserSummary::new("alice", totals, profile);

        let record = SummaryRecord::try_from(&summary).unwrap();

        assert_eq!(
            record.cells(),
            vec![
                "alice",
                "3",
                "12",
                "Rust",
                r#"{"2017-01":1,"2017-02":2}"#,
                r#"{"commits":3}"#,
            ]
        );
        assert_eq!(record.cells().len(), SummaryRecord::header().len());
    }

    #[test]
    fn empty_maps_render_as_empty_objects() {
        let summary = UserSummary::new(
            "ghost",
            PartialContribution::zero(),
            RepositoryProfile::unknown(),
        );

        let record = SummaryRecord::try_from(&summary).unwrap();

        assert_eq!(record.monthly, "{}");
        assert_eq!(record.by_category, "{}");
        assert_eq!(record.primary_language, "N/A");
    }
}
