//! Range query orchestration: fetch, aggregate, and retain the last good
//! chart state across failed refreshes.

use crate::aggregate::{EmotionTally, aggregate};
use crate::chart::{ChartDataset, build_dataset};
use crate::error::StatsError;
use moodlog_client::{DateRange, MoodlogClient};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};

/// The pipeline's presentation-ready output for one range query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub dataset: ChartDataset,
    /// True when no diary activity occurred in the range; the sink renders
    /// an empty-state message instead of the chart.
    pub is_empty: bool,
}

/// One-shot pipeline run: validate the range, fetch, aggregate, build the
/// dataset. The transport suspension inside `get_emotion_statistics` is the
/// only await point; classification and aggregation are synchronous.
pub async fn load_weekly_summary(
    client: &dyn MoodlogClient,
    range: DateRange,
) -> Result<WeeklySummary, StatsError> {
    if range.start > range.end {
        return Err(StatsError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    let records = client.get_emotion_statistics(range).await?;
    let tally = aggregate(&records)?;
    Ok(WeeklySummary {
        is_empty: tally.total == 0,
        dataset: build_dataset(&tally),
    })
}

/// The summary presented to the rendering layer, plus the most recent
/// refresh failure if the summary is stale because of it.
#[derive(Clone, Debug, Serialize)]
pub struct SummaryState {
    pub summary: WeeklySummary,
    pub last_error: Option<String>,
}

/// Drives the pipeline for a presentation layer that re-queries on every
/// range change. Failed refreshes keep the last good summary on display and
/// report the failure out of band; stale or cancelled responses are never
/// applied.
pub struct SummaryService {
    client: Arc<dyn MoodlogClient>,
    state: Mutex<SummaryState>,
    generation: AtomicU64,
}

impl SummaryService {
    pub fn new(client: Arc<dyn MoodlogClient>) -> Self {
        let summary = WeeklySummary {
            dataset: build_dataset(&EmotionTally::default()),
            is_empty: true,
        };
        Self {
            client,
            state: Mutex::new(SummaryState {
                summary,
                last_error: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// The currently retained state.
    pub async fn current(&self) -> SummaryState {
        self.state.lock().await.clone()
    }

    /// Re-run the pipeline for `range`.
    ///
    /// An inverted range is the only hard error and is rejected before any
    /// network call. Fetch and aggregation failures are recovered here: the
    /// retained summary is returned unchanged with `last_error` set, so the
    /// rendering path never observes them as exceptions. Flipping
    /// `cancel_rx` to true before the response arrives suppresses applying
    /// it, and a response that resolves after a newer refresh has been
    /// issued is discarded rather than overwriting the fresher result.
    pub async fn refresh(
        &self,
        range: DateRange,
        mut cancel_rx: watch::Receiver<bool>,
    ) -> Result<SummaryState, StatsError> {
        if range.start > range.end {
            return Err(StatsError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let fetched = tokio::select! {
            res = self.client.get_emotion_statistics(range) => res,
            _ = cancelled(&mut cancel_rx) => {
                tracing::debug!(start = %range.start, end = %range.end,
                    "summary refresh cancelled before response arrived");
                return Ok(self.current().await);
            }
        };

        let outcome = fetched.map_err(StatsError::from).and_then(|records| {
            let tally = aggregate(&records)?;
            Ok(WeeklySummary {
                is_empty: tally.total == 0,
                dataset: build_dataset(&tally),
            })
        });

        let mut state = self.state.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("discarding stale summary response");
            return Ok(state.clone());
        }
        match outcome {
            Ok(summary) => {
                state.summary = summary;
                state.last_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "summary refresh failed, retaining last good state");
                state.last_error = Some(e.to_string());
            }
        }
        Ok(state.clone())
    }
}

/// Resolves once the cancellation flag flips to true; never resolves if the
/// sender is dropped without cancelling.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use moodlog_client::{EmotionRecord, MoodlogError, TrackInfo};

    struct UnreachableSource;

    #[async_trait]
    impl MoodlogClient for UnreachableSource {
        async fn get_emotion_statistics(
            &self,
            _range: DateRange,
        ) -> Result<Vec<EmotionRecord>, MoodlogError> {
            panic!("record source must not be queried");
        }
        async fn get_track_info(&self, _track_id: &str) -> Result<TrackInfo, MoodlogError> {
            unimplemented!()
        }
        async fn set_track_liked(
            &self,
            _social_id: &str,
            _track_id: &str,
            _liked: bool,
        ) -> Result<(), MoodlogError> {
            unimplemented!()
        }
        async fn logout(&self) -> Result<(), MoodlogError> {
            unimplemented!()
        }
    }

    fn backwards_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 8, 30).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
        )
    }

    #[tokio::test]
    async fn inverted_range_fails_before_any_fetch() {
        let err = load_weekly_summary(&UnreachableSource, backwards_range())
            .await
            .unwrap_err();
        assert!(matches!(err, StatsError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn service_rejects_inverted_range_synchronously() {
        let service = SummaryService::new(Arc::new(UnreachableSource));
        let (_tx, rx) = watch::channel(false);
        let err = service.refresh(backwards_range(), rx).await.unwrap_err();
        assert!(matches!(err, StatsError::InvalidRange { .. }));
    }

    #[tokio::test]
    async fn initial_state_is_empty_all_zero() {
        let service = SummaryService::new(Arc::new(UnreachableSource));
        let state = service.current().await;
        assert!(state.summary.is_empty);
        assert_eq!(state.summary.dataset.values, [0; 7]);
        assert!(state.last_error.is_none());
    }
}
