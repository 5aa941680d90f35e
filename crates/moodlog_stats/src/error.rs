//! Custom error types for the aggregation pipeline.

use chrono::NaiveDate;
use moodlog_client::MoodlogError;
use thiserror::Error;

/// Aggregation pipeline errors.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The query range runs backwards; rejected before any network call.
    #[error("invalid range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A record violated the closed category set or score domain. The whole
    /// aggregation fails rather than producing a biased partial tally.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// The record source could not be queried.
    #[error("fetch failed: {0}")]
    Fetch(MoodlogError),
}

impl From<MoodlogError> for StatsError {
    fn from(err: MoodlogError) -> Self {
        match err {
            MoodlogError::MalformedRecord(msg) => StatsError::MalformedRecord(msg),
            other => StatsError::Fetch(other),
        }
    }
}

/// Result type alias for pipeline operations.
pub type StatsResult<T> = Result<T, StatsError>;
