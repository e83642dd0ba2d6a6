//! Record sink port trait

use crate::domain::entities::TabularRecord;
use crate::error::SinkError;

/// Durable, append-only destination for tabular records
///
/// Implementations write the header when they are created. `append` returns
/// only after the record has been handed to the underlying storage, so at most
/// one record is ever pending.
pub trait RecordSink<R: TabularRecord> {
    fn append(&mut self, record: &R) -> Result<(), SinkError>;
}
