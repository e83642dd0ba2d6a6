//! Summary service
//!
//! Runs the yearly aggregator over a list of identities and writes one record
//! per identity as soon as it is done.

use crate::app::yearly_aggregator::YearlyAggregator;
use crate::domain::entities::SummaryRecord;
use crate::domain::ports::{Clock, GitHubClient, RecordSink, Sleeper};
use crate::error::{AppError, SinkError};

/// What happened to a batch of identities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub written: usize,
    /// Identities left out of the output because their summary failed
    pub skipped: Vec<String>,
}

/// Service writing per-user contribution summaries
pub struct SummaryService<GC, S, C>
where
    GC: GitHubClient,
    S: Sleeper,
    C: Clock,
{
    aggregator: YearlyAggregator<GC, S, C>,
}

impl<GC, S, C> SummaryService<GC, S, C>
where
    GC: GitHubClient,
    S: Sleeper,
    C: Clock,
{
    pub fn new(aggregator: YearlyAggregator<GC, S, C>) -> Self {
        Self { aggregator }
    }

    /// Summarize each identity in order and append it to `sink`.
    ///
    /// A failing identity is logged and omitted; it never produces a partial
    /// row. Only a failure to write the output aborts the batch.
    pub async fn run<K>(&self, identities: &[String], sink: &mut K) -> Result<BatchReport, AppError>
    where
        K: RecordSink<SummaryRecord>,
    {
        let mut report = BatchReport::default();

        for (index, login) in identities.iter().enumerate() {
            tracing::info!(
                login = %login,
                position = index + 1,
                of = identities.len(),
                "Summarizing user"
            );

            let summary = match self.aggregator.summarize(login).await {
                Ok(summary) => summary,
                Err(e) => {
                    tracing::error!(login = %login, error = %e, "Failed to summarize user, skipping");
                    report.skipped.push(login.clone());
                    continue;
                }
            };

            let record = SummaryRecord::try_from(&summary).map_err(SinkError::from)?;
            sink.append(&record)?;
            report.written += 1;

            tracing::info!(
                login = %login,
                total = summary.total_contributions,
                repositories = summary.repository_count,
                "Saved contribution summary"
            );
        }

        Ok(report)
    }
}
