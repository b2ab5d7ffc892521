use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fitlog::{FixedClock, Fitlog, RangeToken, Workout, filter_dates};

fn reference_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, 15)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

fn session_dates(count: usize) -> Vec<Workout> {
    (0..count)
        .map(|i| {
            let year = 2023 + (i % 4) as i32;
            let month = i % 12 + 1;
            let day = i % 28 + 1;
            Workout::new(format!("{year:04}-{month:02}-{day:02}"))
        })
        .collect()
}

fn bench_filter_dates(c: &mut Criterion) {
    let records = session_dates(10_000);
    let now = reference_now();

    let mut group = c.benchmark_group("filter_dates");
    for token in [
        RangeToken::OneMonth,
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
        RangeToken::All,
    ] {
        group.bench_function(token.as_str(), |b| {
            b.iter(|| filter_dates(black_box(&records), token, now).unwrap())
        });
    }
    group.finish();
}

fn bench_store_queries(c: &mut Criterion) {
    let mut log = Fitlog::builder()
        .clock(FixedClock(reference_now()))
        .build()
        .unwrap();
    for record in session_dates(10_000) {
        log.insert(record).unwrap();
    }

    let mut group = c.benchmark_group("store_queries");
    group.bench_function("dates_in_range_6m", |b| {
        b.iter(|| log.dates_in_range(black_box(RangeToken::SixMonths)).unwrap())
    });

    let start = NaiveDate::from_ymd_opt(2025, 9, 1)
        .unwrap()
        .and_time(NaiveTime::MIN);
    group.bench_function("workouts_between", |b| {
        b.iter(|| log.workouts_between(black_box(start), reference_now()).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_filter_dates, bench_store_queries);
criterion_main!(benches);
