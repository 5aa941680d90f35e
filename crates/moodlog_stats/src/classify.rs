//! Dominant-emotion classification for a single day's scores.

use chrono::NaiveDate;
use moodlog_client::{Emotion, EmotionRecord, EmotionScores};
use serde::Serialize;

/// The dominant emotion derived for one day. `category` is `None` when no
/// emotion was recorded that day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DominantEmotion {
    pub date: NaiveDate,
    pub category: Option<Emotion>,
}

/// Select the single dominant emotion for one day's scores.
///
/// Scans the fixed category order, replacing the running winner only on a
/// strictly greater value, so ties resolve to the earliest category. An
/// all-zero day yields `None` instead of defaulting to the first category,
/// which would otherwise skew the weekly tally toward anger.
///
/// Pure function; callers are expected to have validated the scores
/// (finite, non-negative) at the source boundary.
pub fn dominant_emotion(scores: &EmotionScores) -> Option<Emotion> {
    let mut winner = Emotion::ALL[0];
    let mut best = scores.get(winner);
    for &emotion in &Emotion::ALL[1..] {
        let value = scores.get(emotion);
        if value > best {
            winner = emotion;
            best = value;
        }
    }
    if best <= 0.0 { None } else { Some(winner) }
}

/// Classify one record, keeping its date alongside the derived category.
pub fn classify_record(record: &EmotionRecord) -> DominantEmotion {
    DominantEmotion {
        date: record.date,
        category: dominant_emotion(&record.scores),
    }
}
