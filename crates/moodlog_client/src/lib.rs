//! Minimal `MoodlogClient` trait and the typed wire model for the
//! mood-journal backend.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod retry;

#[derive(Debug, Error)]
pub enum MoodlogError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication error: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed record: {0}")]
    MalformedRecord(String),
    #[error("unexpected status {0}: {1}")]
    Status(u16, String),
}

/// The closed set of diary emotion categories, in tie-break priority order.
///
/// The order here is load-bearing: the dominant-emotion classifier resolves
/// ties in favor of the earliest category, and chart datasets emit slots in
/// this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Sad,
    Delight,
    Calm,
    #[serde(alias = "embarrased")]
    Embarrassed,
    Anxiety,
    Love,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Sad,
        Emotion::Delight,
        Emotion::Calm,
        Emotion::Embarrassed,
        Emotion::Anxiety,
        Emotion::Love,
    ];

    /// Position in the fixed category order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name (the backend's typo `embarrased` is confined
    /// to the serde attributes on [`EmotionScores`]).
    pub fn name(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Sad => "sad",
            Emotion::Delight => "delight",
            Emotion::Calm => "calm",
            Emotion::Embarrassed => "embarrassed",
            Emotion::Anxiety => "anxiety",
            Emotion::Love => "love",
        }
    }
}

/// One day's per-category intensities. Every category is required on the
/// wire, so a record missing one fails to decode instead of silently
/// defaulting to zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub angry: f64,
    pub sad: f64,
    pub delight: f64,
    pub calm: f64,
    // The backend spells this key without the double consonant.
    #[serde(rename = "embarrased")]
    pub embarrassed: f64,
    pub anxiety: f64,
    pub love: f64,
}

impl EmotionScores {
    pub fn get(&self, emotion: Emotion) -> f64 {
        match emotion {
            Emotion::Angry => self.angry,
            Emotion::Sad => self.sad,
            Emotion::Delight => self.delight,
            Emotion::Calm => self.calm,
            Emotion::Embarrassed => self.embarrassed,
            Emotion::Anxiety => self.anxiety,
            Emotion::Love => self.love,
        }
    }

    /// Reject scores the aggregation must never operate on: NaN/infinite
    /// values and negative intensities.
    pub fn validate(&self) -> Result<(), MoodlogError> {
        for emotion in Emotion::ALL {
            let value = self.get(emotion);
            if !value.is_finite() {
                return Err(MoodlogError::MalformedRecord(format!(
                    "non-finite score for {}: {}",
                    emotion.name(),
                    value
                )));
            }
            if value < 0.0 {
                return Err(MoodlogError::MalformedRecord(format!(
                    "negative score for {}: {}",
                    emotion.name(),
                    value
                )));
            }
        }
        Ok(())
    }
}

/// One calendar day's emotion record as returned by `/statistic/emotion`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionRecord {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub scores: EmotionScores,
}

/// Inclusive date range for a statistics query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Expand into the six integer query parameters the backend expects.
    pub fn query_pairs(&self) -> [(&'static str, String); 6] {
        [
            ("startYear", self.start.year().to_string()),
            ("startMonth", self.start.month().to_string()),
            ("startDay", self.start.day().to_string()),
            ("endYear", self.end.year().to_string()),
            ("endMonth", self.end.month().to_string()),
            ("endDay", self.end.day().to_string()),
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlbumImage {
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    pub images: Vec<AlbumImage>,
    pub release_date: String,
}

/// Track metadata from the music recommendation service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub album: Album,
    pub preview_url: Option<String>,
    pub duration_ms: u64,
    #[serde(rename = "isLiked")]
    pub is_liked: bool,
}

#[async_trait]
pub trait MoodlogClient: Send + Sync + 'static {
    /// Fetch per-day emotion records for an inclusive date range. Every
    /// record is schema-validated; a malformed record fails the whole query.
    async fn get_emotion_statistics(
        &self,
        range: DateRange,
    ) -> Result<Vec<EmotionRecord>, MoodlogError>;

    /// Fetch metadata for a recommended track.
    async fn get_track_info(&self, track_id: &str) -> Result<TrackInfo, MoodlogError>;

    /// Toggle the like flag on a recommended track.
    async fn set_track_liked(
        &self,
        social_id: &str,
        track_id: &str,
        liked: bool,
    ) -> Result<(), MoodlogError>;

    /// Invalidate the current session on the backend.
    async fn logout(&self) -> Result<(), MoodlogError>;
}
