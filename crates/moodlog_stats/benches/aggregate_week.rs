use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use moodlog_client::{EmotionRecord, EmotionScores};
use moodlog_stats::{aggregate, build_dataset};

fn synthetic_records(days: usize) -> Vec<EmotionRecord> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 1).expect("date");
    (0..days)
        .map(|i| EmotionRecord {
            date: start + chrono::Duration::days(i as i64),
            scores: EmotionScores {
                angry: (i % 3) as f64,
                sad: (i % 5) as f64,
                delight: (i % 7) as f64,
                calm: (i % 2) as f64,
                embarrassed: 0.0,
                anxiety: (i % 4) as f64,
                love: (i % 6) as f64,
            },
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let week = synthetic_records(7);
    let year = synthetic_records(365);

    c.bench_function("aggregate_week", |b| {
        b.iter(|| {
            let tally = aggregate(std::hint::black_box(&week)).expect("tally");
            build_dataset(&tally)
        })
    });
    c.bench_function("aggregate_year", |b| {
        b.iter(|| {
            let tally = aggregate(std::hint::black_box(&year)).expect("tally");
            build_dataset(&tally)
        })
    });
}

criterion_group!(benches, bench_aggregate);
criterion_main!(benches);
