//! CSV file adapters

mod reader;
mod sink;

pub use reader::read_identities;
pub use sink::CsvRecordSink;
