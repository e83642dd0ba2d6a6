use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "contrib-census")]
#[command(about = "Contribution statistics for GitHub users and organizations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize the contribution history of every user listed in a file
    Users {
        #[arg(long, help = "CSV file with one login per row in the first column")]
        input: PathBuf,

        #[arg(long, help = "CSV file to write the summaries to")]
        output: PathBuf,

        #[arg(long, help = "Treat the first row of the input as a header", default_value_t = false)]
        skip_header: bool,
    },
    /// List everyone who committed to an organization's repositories
    Contributors {
        #[arg(long, help = "Organization login")]
        org: String,

        #[arg(long, value_parser = parse_since, help = "Start of the range (RFC3339 or YYYY-MM-DD)")]
        since: DateTime<Utc>,

        #[arg(long, value_parser = parse_until, help = "End of the range, inclusive (RFC3339 or YYYY-MM-DD)")]
        until: DateTime<Utc>,

        #[arg(long, help = "CSV file to write the contributors to")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

/// Parse an RFC 3339 timestamp, or a bare date taken at `time_of_day` UTC
fn parse_timestamp(value: &str, time_of_day: NaiveTime) -> Result<DateTime<Utc>, String> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(time_of_day).and_utc())
        .map_err(|_| format!("'{}' is neither an RFC3339 timestamp nor a YYYY-MM-DD date", value))
}

fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value, NaiveTime::MIN)
}

/// A bare date covers the whole day
fn parse_until(value: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    parse_timestamp(value, end_of_day)
}
