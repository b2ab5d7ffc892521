//! Workout records and date parsing.

use crate::error::{FitlogError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single workout session as captured by a client.
///
/// Only the `date` field carries meaning for the store's dated queries;
/// everything else is opaque payload carried along unchanged.
///
/// # Examples
///
/// ```rust
/// use fitlog::Workout;
///
/// let session = Workout::new("2026-02-10T18:30:00")
///     .with_title("upper body")
///     .with_detail("sets", 12);
///
/// assert!(session.parsed_date().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// When the session happened, in an ISO-8601-like form
    /// (`2026-02-10`, `2026-02-10T18:30:00`, RFC 3339).
    pub date: String,

    /// Short session label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Free-form payload: exercise list, durations, notes.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl Workout {
    /// Create a record with only a date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: None,
            details: Map::new(),
        }
    }

    /// Set the session label.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a payload entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Parse the record's date string.
    ///
    /// # Errors
    ///
    /// Returns [`FitlogError::InvalidDate`] when the string matches none of
    /// the accepted forms.
    pub fn parsed_date(&self) -> Result<NaiveDateTime> {
        parse_date(&self.date)
    }
}

/// Parse an ISO-8601-like date string into a naive date-time.
///
/// Accepted forms, tried in order:
///
/// 1. RFC 3339 (`2026-02-10T18:30:00+02:00`); the clock-face time is kept,
///    the offset discarded
/// 2. `%Y-%m-%dT%H:%M:%S` with optional fractional seconds
/// 3. `%Y-%m-%d %H:%M:%S` with optional fractional seconds
/// 4. Bare date `%Y-%m-%d`, taken as midnight
pub fn parse_date(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }

    Err(FitlogError::invalid_date(
        value,
        "expected an ISO-8601-like date or date-time",
    ))
}
