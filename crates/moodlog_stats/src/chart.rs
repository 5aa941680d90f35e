//! Converting a tally into a dataset the chart sink can render directly.

use crate::aggregate::EmotionTally;
use moodlog_client::Emotion;
use serde::Serialize;

/// Display names, one per category in the fixed order.
pub const LABELS: [&str; 7] = [
    "Angry",
    "Sad",
    "Delight",
    "Calm",
    "Embarrassed",
    "Anxiety",
    "Love",
];

/// Color tokens, one per category in the fixed order. Static lookup, never
/// derived from the data.
pub const COLORS: [&str; 7] = [
    "#FF6384", // Angry
    "#36A2EB", // Sad
    "#FFCE56", // Delight
    "#4BC0C0", // Calm
    "#9966FF", // Embarrassed
    "#FF9F40", // Anxiety
    "#FFCD56", // Love
];

pub fn label(emotion: Emotion) -> &'static str {
    LABELS[emotion.index()]
}

pub fn color(emotion: Emotion) -> &'static str {
    COLORS[emotion.index()]
}

/// Chart-ready output: three position-aligned slots per category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChartDataset {
    pub labels: [&'static str; 7],
    pub values: [u32; 7],
    pub colors: [&'static str; 7],
}

/// Reorder a tally into the fixed label/color layout. No business logic
/// happens here; zero counts pass through untouched (the empty/no-data
/// distinction is the orchestrator's flag, not the dataset's).
pub fn build_dataset(tally: &EmotionTally) -> ChartDataset {
    let mut values = [0u32; 7];
    for emotion in Emotion::ALL {
        values[emotion.index()] = tally.count(emotion);
    }
    ChartDataset {
        labels: LABELS,
        values,
        colors: COLORS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_colors_are_stable_across_calls() {
        let mut busy = EmotionTally::default();
        busy.counts = [1, 2, 3, 4, 5, 6, 7];
        busy.total = 28;

        let empty = build_dataset(&EmotionTally::default());
        let full = build_dataset(&busy);
        assert_eq!(empty.labels, full.labels);
        assert_eq!(empty.colors, full.colors);
    }

    #[test]
    fn values_align_with_category_positions() {
        let mut tally = EmotionTally::default();
        tally.counts[Emotion::Delight.index()] = 3;
        tally.counts[Emotion::Love.index()] = 1;
        tally.total = 4;

        let dataset = build_dataset(&tally);
        assert_eq!(dataset.values, [0, 0, 3, 0, 0, 0, 1]);
        assert_eq!(dataset.labels[2], "Delight");
        assert_eq!(dataset.colors[6], "#FFCD56");
    }

    #[test]
    fn zero_counts_are_preserved_not_dropped() {
        let dataset = build_dataset(&EmotionTally::default());
        assert_eq!(dataset.values, [0; 7]);
        assert_eq!(dataset.labels.len(), 7);
    }

    #[test]
    fn per_emotion_lookups_match_tables() {
        assert_eq!(label(Emotion::Embarrassed), "Embarrassed");
        assert_eq!(color(Emotion::Angry), "#FF6384");
    }

    #[test]
    fn dataset_serializes_positionally() {
        let mut tally = EmotionTally::default();
        tally.counts[Emotion::Sad.index()] = 2;
        tally.total = 2;
        let json = serde_json::to_value(build_dataset(&tally)).expect("json");
        assert_eq!(json["values"][1], 2);
        assert_eq!(json["labels"][1], "Sad");
    }
}
