//! Calendar-window behavior in detail: fixed reference instants, year
//! rollover, and the standalone filter over caller-owned records.
//!
//! Run with: `cargo run --example range_queries`

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fitlog::prelude::*;

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

fn main() -> Result<()> {
    env_logger::init();

    // A store pinned to a known instant: queries become reproducible.
    let now = dt(2026, 2, 15);
    let mut log = Fitlog::builder().clock(FixedClock(now)).build()?;

    for date in [
        "2026-02-10",
        "2026-01-15",
        "2025-12-15",
        "2025-11-15",
        "2025-09-15",
        "2025-08-30",
    ] {
        log.insert(Workout::new(date))?;
    }

    println!("Reference instant: {now}");
    for range in [
        RangeToken::OneMonth,
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
    ] {
        if let Some(start) = range.window_start(now) {
            println!("{range}: window starts {start}");
        }
        println!("{range}: {:?}", log.dates_in_range(range)?);
    }

    // Year rollover: two months before January is November of the prior year.
    let january = dt(2026, 1, 15);
    println!(
        "3m window at {january} starts {:?}",
        RangeToken::ThreeMonths.window_start(january)
    );

    // The same windows work over records you hold yourself.
    let records = vec![
        Workout::new("2026-02-01T06:30:00"),
        Workout::new("not-a-date"), // skipped with a warning
        Workout::new("2025-12-01"),
    ];
    let dates = filter_dates(&records, RangeToken::ThreeMonths, now)?;
    println!("Standalone filter kept {} of {} records", dates.len(), records.len());

    Ok(())
}
