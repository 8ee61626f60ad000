use chrono::{Duration, FixedOffset, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use sabrosa::models::{FoodItem, LoggedFood};
use sabrosa::services::daily_log::todays_entries;
use std::hint::black_box;

fn benchmark_todays_entries(c: &mut Criterion) {
    let offset = FixedOffset::west_opt(7 * 3600).expect("valid offset");
    let now = offset
        .with_ymd_and_hms(2024, 5, 2, 12, 0, 0)
        .single()
        .expect("valid date");

    // A year of history: ten entries a day, with a mix of amount formats
    let start = now.with_timezone(&Utc) - Duration::days(365);
    let amounts = ["100", "12.5", "150g", "", "abc"];
    let log: Vec<LoggedFood> = (0..3650u64)
        .map(|i| {
            LoggedFood::new(
                FoodItem {
                    fdc_id: 100_000 + i % 500,
                    name: None,
                    shortened_name: None,
                    emojis: None,
                },
                Some(amounts[(i % 5) as usize].to_string()),
                start + Duration::minutes(144 * i as i64),
            )
        })
        .collect();

    let empty: Vec<LoggedFood> = Vec::new();

    let mut group = c.benchmark_group("daily_log");

    group.bench_function("year_of_history", |b| {
        b.iter(|| todays_entries(black_box(&log), black_box(&now)))
    });

    group.bench_function("empty_log", |b| {
        b.iter(|| todays_entries(black_box(&empty), black_box(&now)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_todays_entries);
criterion_main!(benches);
