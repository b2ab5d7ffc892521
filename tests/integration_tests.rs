use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use fitlog::{
    Config, FitlogError, FixedClock, Fitlog, MalformedDatePolicy, RangeToken, Workout,
    filter_dates, filter_dates_with_policy,
};

fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_time(NaiveTime::MIN)
}

fn reference_now() -> NaiveDateTime {
    dt(2026, 2, 15)
}

fn reference_dates() -> Vec<&'static str> {
    vec![
        "2026-02-10",
        "2026-01-15",
        "2025-12-15",
        "2025-11-15",
        "2025-09-15",
        "2025-08-30",
        "2025-08-15",
    ]
}

fn seeded_log() -> Fitlog {
    let mut log = Fitlog::builder()
        .clock(FixedClock(reference_now()))
        .build()
        .expect("Failed to create store");
    for date in reference_dates() {
        log.insert(Workout::new(date)).expect("Failed to insert");
    }
    log
}

#[test]
fn test_each_token_selects_its_reference_window() {
    let log = seeded_log();

    assert_eq!(
        log.dates_in_range(RangeToken::OneMonth).unwrap(),
        vec![dt(2026, 2, 10)]
    );
    assert_eq!(
        log.dates_in_range(RangeToken::ThreeMonths).unwrap(),
        vec![dt(2026, 2, 10), dt(2026, 1, 15), dt(2025, 12, 15)]
    );
    assert_eq!(
        log.dates_in_range(RangeToken::SixMonths).unwrap(),
        vec![
            dt(2026, 2, 10),
            dt(2026, 1, 15),
            dt(2025, 12, 15),
            dt(2025, 11, 15),
            dt(2025, 9, 15),
        ]
    );
    assert_eq!(
        log.dates_in_range(RangeToken::OneYear).unwrap(),
        vec![dt(2026, 2, 10)]
    );
}

#[test]
fn test_unrecognized_token_passes_all_records() {
    let log = seeded_log();

    let token = RangeToken::from_token("last-tuesday");
    let dates = log.dates_in_range(token).unwrap();
    assert_eq!(dates.len(), reference_dates().len());

    // Insertion order preserved
    let expected: Vec<NaiveDateTime> = reference_dates()
        .iter()
        .map(|d| fitlog::parse_date(d).unwrap())
        .collect();
    assert_eq!(dates, expected);
}

#[test]
fn test_standalone_filter_agrees_with_store_queries() {
    let records: Vec<Workout> = reference_dates().into_iter().map(Workout::new).collect();
    let log = seeded_log();

    for token in [
        RangeToken::OneMonth,
        RangeToken::ThreeMonths,
        RangeToken::SixMonths,
        RangeToken::OneYear,
        RangeToken::All,
    ] {
        let standalone = filter_dates(&records, token, reference_now()).unwrap();
        let stored = log.dates_in_range(token).unwrap();
        assert_eq!(standalone, stored, "{token}");
    }
}

#[test]
fn test_filter_is_pure_and_repeatable() {
    let records: Vec<Workout> = reference_dates().into_iter().map(Workout::new).collect();
    let before = records.clone();

    let first = filter_dates(&records, RangeToken::SixMonths, reference_now()).unwrap();
    let second = filter_dates(&records, RangeToken::SixMonths, reference_now()).unwrap();

    assert_eq!(first, second);
    assert_eq!(records, before);
}

#[test]
fn test_year_rollover_window_start() {
    // With a January reference instant, the three-month window must start
    // in November of the prior year.
    let now = dt(2026, 1, 15);
    assert_eq!(
        RangeToken::ThreeMonths.window_start(now),
        Some(dt(2025, 11, 1))
    );

    let records = vec![
        Workout::new("2025-11-01"),
        Workout::new("2025-10-31T23:59:59"),
    ];
    let dates = filter_dates(&records, RangeToken::ThreeMonths, now).unwrap();
    assert_eq!(dates, vec![dt(2025, 11, 1)]);
}

#[test]
fn test_future_dates_are_not_excluded() {
    let records = vec![Workout::new("2027-06-01")];
    let dates = filter_dates(&records, RangeToken::ThreeMonths, reference_now()).unwrap();
    assert_eq!(dates, vec![dt(2027, 6, 1)]);
}

#[test]
fn test_malformed_record_behavior_is_explicit() {
    let records = vec![
        Workout::new("2026-02-10"),
        Workout::new("see you tomorrow"),
    ];

    // Default: skipped, never compared
    let dates = filter_dates(&records, RangeToken::All, reference_now()).unwrap();
    assert_eq!(dates, vec![dt(2026, 2, 10)]);

    // Strict: typed error naming the offending value
    let err = filter_dates_with_policy(
        &records,
        RangeToken::All,
        reference_now(),
        MalformedDatePolicy::Error,
    )
    .unwrap_err();
    match err {
        FitlogError::InvalidDate { value, .. } => assert_eq!(value, "see you tomorrow"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_store_rejects_malformed_under_strict_config() {
    let config = Config::default().with_malformed_dates(MalformedDatePolicy::Error);
    let mut log = Fitlog::memory_with_config(config).expect("Failed to create store");

    assert!(log.insert(Workout::new("2026-02-10")).is_ok());
    assert!(log.insert(Workout::new("??")).is_err());
    assert_eq!(log.len(), 1);
}

#[test]
fn test_payload_survives_store_round_trip() {
    let mut log = Fitlog::memory().expect("Failed to create store");
    let session = Workout::new("2026-02-10T07:45:00")
        .with_title("morning ride")
        .with_detail("distance_km", 24)
        .with_detail("exercises", serde_json::json!(["warmup", "sprints"]));

    let id = log.insert(session.clone()).unwrap();
    assert_eq!(log.get(id).unwrap().unwrap(), session);
}

#[test]
fn test_atomic_import_is_all_or_nothing() {
    let config = Config::default().with_malformed_dates(MalformedDatePolicy::Error);
    let mut log = Fitlog::memory_with_config(config).expect("Failed to create store");

    let result = log.atomic(|batch| {
        for date in ["2026-02-01", "2026-02-02", "not a date", "2026-02-04"] {
            batch.insert(Workout::new(date))?;
        }
        Ok(())
    });

    assert!(result.is_err());
    assert!(log.is_empty());

    log.atomic(|batch| {
        for date in ["2026-02-01", "2026-02-02"] {
            batch.insert(Workout::new(date))?;
        }
        Ok(())
    })
    .unwrap();
    assert_eq!(log.len(), 2);
}

#[test]
fn test_interval_scan_is_inclusive_and_ordered() {
    let log = seeded_log();

    let window = log
        .workouts_between(dt(2025, 9, 15), dt(2026, 1, 15))
        .unwrap();
    let dates: Vec<NaiveDateTime> = window.iter().map(|(date, _)| *date).collect();
    assert_eq!(
        dates,
        vec![
            dt(2025, 9, 15),
            dt(2025, 11, 15),
            dt(2025, 12, 15),
            dt(2026, 1, 15),
        ]
    );
}

#[test]
fn test_stats_reflect_store_contents() {
    let mut log = seeded_log();
    log.insert(Workout::new("???")).unwrap();

    let stats = log.stats();
    assert_eq!(stats.record_count, 8);
    assert_eq!(stats.malformed_count, 1);
    assert_eq!(stats.operations_count, 8);
}

#[cfg(feature = "snapshot")]
mod snapshot {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_snapshot_survives_reopen() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("history.fitlog");

        let id;
        {
            let mut log = Fitlog::open(&path).expect("Failed to open store");
            id = log
                .insert(Workout::new("2026-02-10").with_title("tempo"))
                .unwrap();
            log.insert(Workout::new("2025-12-24")).unwrap();
            log.close().unwrap();
        }

        let log = Fitlog::open(&path).expect("Failed to reopen store");
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(id).unwrap().unwrap().title.as_deref(), Some("tempo"));

        // Insertion order survives the round trip
        let all = log.workouts().unwrap();
        assert_eq!(all[0].date, "2026-02-10");
        assert_eq!(all[1].date, "2025-12-24");
    }

    #[test]
    fn test_drop_writes_snapshot() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("drop.fitlog");

        {
            let mut log = Fitlog::open(&path).expect("Failed to open store");
            log.insert(Workout::new("2026-02-10")).unwrap();
            // Store dropped here, should write the snapshot
        }

        let log = Fitlog::open(&path).expect("Failed to reopen store");
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_auto_snapshot_interval() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("auto.fitlog");

        let config = Config::default().with_snapshot_auto_ops(2);
        let mut log = Fitlog::open_with_config(&path, config).expect("Failed to open store");
        log.insert(Workout::new("2026-02-01")).unwrap();
        log.insert(Workout::new("2026-02-02")).unwrap();

        // Two mutations have elapsed; the snapshot is already on disk even
        // though the store was neither synced nor closed.
        let other = Fitlog::open(&path).expect("Failed to reopen store");
        assert_eq!(other.len(), 2);

        drop(other);
        drop(log);
    }
}

#[cfg(feature = "sync")]
mod sync {
    use super::*;
    use fitlog::SyncDB;
    use std::thread;

    #[test]
    fn test_shared_store_across_threads() {
        let db = SyncDB::memory().expect("Failed to create store");

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let db = db.clone();
                thread::spawn(move || {
                    for day in 1..=7 {
                        let date = format!("2026-0{}-{:02}", i + 1, day);
                        db.insert(Workout::new(date)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(db.len(), 28);
        let dates = db
            .dates_in_range_at(RangeToken::All, reference_now())
            .unwrap();
        assert_eq!(dates.len(), 28);
    }
}
