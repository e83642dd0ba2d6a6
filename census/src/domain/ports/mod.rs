//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod github;
pub mod runtime;
pub mod sink;

pub use github::{
    ContributionCollection, ContributionDay, GitHubClient, Page, PageCursor, RepositoryOverview,
};
pub use runtime::{Clock, Sleeper};
pub use sink::RecordSink;
