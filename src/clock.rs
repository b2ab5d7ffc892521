//! Clock injection for time-dependent queries.
//!
//! Range windows are computed against a reference instant. Production code
//! reads it from the system clock; tests pin it with [`FixedClock`] so
//! calendar-window queries are deterministic.

use chrono::{Local, NaiveDateTime};
use std::fmt;

/// Source of the reference instant used by dated queries.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current reference instant.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local wall clock. This is the default for a store built
/// without an explicit clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant. Intended for tests and replays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
