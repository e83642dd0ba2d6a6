//! Domain entities
//!
//! Pure domain models: contribution windows and totals, repositories and
//! commits, and the flat records written to the output files.

pub mod contribution;
pub mod record;
pub mod repository;

pub use contribution::{
    month_key, Category, ContributionWindow, PartialContribution, UserSummary,
};
pub use record::{ContributorRecord, SummaryRecord, TabularRecord};
pub use repository::{CommitRange, CommitRecord, RepositoryProfile, RepositoryRef};
