//! The calendar range filter over workout records.
//!
//! This is a pure function of (records, range token, reference instant):
//! it mutates nothing, keeps no state between calls, and is idempotent. The
//! store's dated queries are built on the same window predicates; this module
//! is the standalone entry point for callers holding their own record slices.

use crate::config::MalformedDatePolicy;
use crate::error::Result;
use crate::range::RangeToken;
use crate::record::Workout;
use chrono::NaiveDateTime;

/// Dates of the records falling inside `range` relative to `now`, in the
/// same relative order as the input. Records with unparseable dates are
/// skipped with a logged warning.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use fitlog::{RangeToken, Workout, filter_dates};
///
/// let sessions = vec![
///     Workout::new("2026-02-10"),
///     Workout::new("2025-08-15"),
/// ];
/// let now = NaiveDate::from_ymd_opt(2026, 2, 15)
///     .unwrap()
///     .and_hms_opt(0, 0, 0)
///     .unwrap();
///
/// let dates = filter_dates(&sessions, RangeToken::OneMonth, now)?;
/// assert_eq!(dates.len(), 1);
/// # Ok::<(), fitlog::FitlogError>(())
/// ```
pub fn filter_dates(
    records: &[Workout],
    range: RangeToken,
    now: NaiveDateTime,
) -> Result<Vec<NaiveDateTime>> {
    filter_dates_with_policy(records, range, now, MalformedDatePolicy::Skip)
}

/// Like [`filter_dates`], with an explicit malformed-date policy.
///
/// Under [`MalformedDatePolicy::Error`] the first unparseable date fails the
/// whole call; no partially filtered result is returned.
pub fn filter_dates_with_policy(
    records: &[Workout],
    range: RangeToken,
    now: NaiveDateTime,
    policy: MalformedDatePolicy,
) -> Result<Vec<NaiveDateTime>> {
    let mut dates = Vec::new();

    for record in records {
        let date = match record.parsed_date() {
            Ok(date) => date,
            Err(err) => match policy {
                MalformedDatePolicy::Skip => {
                    log::warn!("Skipping record with unparseable date: {}", err);
                    continue;
                }
                MalformedDatePolicy::Error => return Err(err),
            },
        };

        if range.matches(date, now) {
            dates.push(date);
        }
    }

    Ok(dates)
}
