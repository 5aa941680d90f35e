//! Tallying dominant emotions over a date range.

use crate::classify::classify_record;
use crate::error::StatsError;
use moodlog_client::{Emotion, EmotionRecord, MoodlogError};
use serde::Serialize;

/// Occurrence counts of dominant emotions over a range, one slot per
/// category in the fixed order. `total` counts only days where a dominant
/// emotion could be determined, so `total == 0` means no diary activity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EmotionTally {
    pub counts: [u32; 7],
    pub total: u32,
}

impl EmotionTally {
    pub fn count(&self, emotion: Emotion) -> u32 {
        self.counts[emotion.index()]
    }
}

/// Tally dominant-emotion occurrences across `records`.
///
/// Every record is validated first; a malformed record fails the whole
/// aggregation since silently dropping a category would bias the result.
/// An empty slice is a normal case and yields the all-zero tally.
pub fn aggregate(records: &[EmotionRecord]) -> Result<EmotionTally, StatsError> {
    for record in records {
        record.scores.validate().map_err(|e| match e {
            MoodlogError::MalformedRecord(msg) => {
                StatsError::MalformedRecord(format!("{}: {}", record.date, msg))
            }
            other => StatsError::from(other),
        })?;
    }

    let mut tally = EmotionTally::default();
    for record in records {
        if let Some(emotion) = classify_record(record).category {
            tally.counts[emotion.index()] += 1;
            tally.total += 1;
        }
    }
    Ok(tally)
}
