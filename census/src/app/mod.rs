//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod contributor_collector;
pub mod pagination;
pub mod retry;
pub mod summary_service;
pub mod yearly_aggregator;

pub use contributor_collector::ContributorCollector;
pub use retry::{RetryPolicy, RetryingFetcher};
pub use summary_service::SummaryService;
pub use yearly_aggregator::YearlyAggregator;
