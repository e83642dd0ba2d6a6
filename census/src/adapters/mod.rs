//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod csv;
pub mod github;
pub mod system;

pub use self::csv::{read_identities, CsvRecordSink};
pub use github::GitHubClientImpl;
pub use system::{SystemClock, TokioSleeper};
