//! CSV record sink

use std::fs::{File, OpenOptions};
use std::marker::PhantomData;
use std::path::Path;

use crate::domain::entities::TabularRecord;
use crate::domain::ports::RecordSink;
use crate::error::SinkError;

/// Writes records to a CSV file, one synced row per `append`
pub struct CsvRecordSink<R: TabularRecord> {
    writer: csv::Writer<File>,
    _record: PhantomData<fn(&R)>,
}

impl<R: TabularRecord> CsvRecordSink<R> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;

        let mut sink = Self {
            writer: csv::Writer::from_writer(file),
            _record: PhantomData,
        };
        sink.writer.write_record(R::header())?;
        sink.sync()?;

        tracing::debug!(path = %path.as_ref().display(), "Opened output file");
        Ok(sink)
    }

    fn sync(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }
}

impl<R: TabularRecord> RecordSink<R> for CsvRecordSink<R> {
    fn append(&mut self, record: &R) -> Result<(), SinkError> {
        self.writer.write_record(record.cells())?;
        self.sync()
    }
}
