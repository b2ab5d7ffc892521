//! Relative calendar windows selected by short range tokens.
//!
//! Windows are computed from the calendar month/year fields of a reference
//! instant, never from fixed day counts: "three months" starting mid-February
//! means everything since the first of December.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Selects a calendar window relative to a reference instant.
///
/// Tokens are total: any string outside the recognized set maps to
/// [`RangeToken::All`], which passes every record through unchanged. That is
/// the documented default case, not an error.
///
/// # Examples
///
/// ```rust
/// use fitlog::RangeToken;
///
/// assert_eq!(RangeToken::from_token("3m"), RangeToken::ThreeMonths);
/// assert_eq!(RangeToken::from_token("everything"), RangeToken::All);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RangeToken {
    /// Same calendar month and year as the reference instant (`1m`).
    OneMonth,
    /// Everything since the first of the month two calendar months before
    /// the reference instant's month (`3m`). Inclusive at the boundary
    /// midnight, unbounded toward the future.
    ThreeMonths,
    /// Everything since the first of the month five calendar months before
    /// the reference instant's month (`6m`).
    SixMonths,
    /// Same calendar year as the reference instant (`1y`).
    OneYear,
    /// No filtering; every record passes.
    #[default]
    All,
}

impl RangeToken {
    /// Map a token string to its window. Unrecognized tokens select
    /// [`RangeToken::All`].
    pub fn from_token(token: &str) -> Self {
        match token {
            "1m" => RangeToken::OneMonth,
            "3m" => RangeToken::ThreeMonths,
            "6m" => RangeToken::SixMonths,
            "1y" => RangeToken::OneYear,
            _ => RangeToken::All,
        }
    }

    /// The canonical token string for this window.
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeToken::OneMonth => "1m",
            RangeToken::ThreeMonths => "3m",
            RangeToken::SixMonths => "6m",
            RangeToken::OneYear => "1y",
            RangeToken::All => "all",
        }
    }

    /// Whether `date` falls inside this window relative to `now`.
    ///
    /// The `3m`/`6m` windows have no upper bound: a date after `now` passes.
    pub fn matches(&self, date: NaiveDateTime, now: NaiveDateTime) -> bool {
        match self {
            RangeToken::OneMonth => date.year() == now.year() && date.month() == now.month(),
            RangeToken::ThreeMonths => date >= month_window_start(now, 2),
            RangeToken::SixMonths => date >= month_window_start(now, 5),
            RangeToken::OneYear => date.year() == now.year(),
            RangeToken::All => true,
        }
    }

    /// Inclusive lower bound of the window, where one exists.
    ///
    /// Only the `3m` and `6m` windows are defined by a lower bound; the
    /// month/year windows and `All` return `None`.
    pub fn window_start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            RangeToken::ThreeMonths => Some(month_window_start(now, 2)),
            RangeToken::SixMonths => Some(month_window_start(now, 5)),
            _ => None,
        }
    }
}

impl fmt::Display for RangeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RangeToken {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(RangeToken::from_token(s))
    }
}

impl Serialize for RangeToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RangeToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(RangeToken::from_token(&token))
    }
}

/// Midnight on the first day of the month `months_back` calendar months
/// before `now`'s month. Month arithmetic carries across year boundaries.
pub(crate) fn month_window_start(now: NaiveDateTime, months_back: u32) -> NaiveDateTime {
    let total = i64::from(now.year()) * 12 + i64::from(now.month0()) - i64::from(months_back);
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;

    // from_ymd_opt with day 1 only fails outside chrono's representable years
    NaiveDate::from_ymd_opt(year as i32, month0 + 1, 1)
        .map(|d| d.and_time(NaiveTime::MIN))
        .unwrap_or(NaiveDateTime::MIN)
}
