//! Weekly emotion aggregation pipeline for the mood-journal backend.
//!
//! Takes the per-day emotion records a [`moodlog_client::MoodlogClient`]
//! fetches for a date range, determines each day's dominant emotion, tallies
//! dominant-emotion occurrences across the range, and produces a
//! chart-ready dataset plus an explicit empty flag.

pub mod aggregate;
pub mod chart;
pub mod classify;
pub mod error;
pub mod summary;

pub use aggregate::{EmotionTally, aggregate};
pub use chart::{ChartDataset, build_dataset};
pub use classify::{DominantEmotion, classify_record, dominant_emotion};
pub use error::StatsError;
pub use summary::{SummaryService, SummaryState, WeeklySummary, load_weekly_summary};
