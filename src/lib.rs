//! Embedded workout-history store with calendar-range queries, injectable
//! clock, and optional snapshot persistence.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fitlog::{Fitlog, RangeToken, Workout};
//!
//! let mut log = Fitlog::memory()?;
//! log.insert(Workout::new("2026-02-10").with_title("intervals"))?;
//! log.insert(Workout::new("2025-08-15"))?;
//!
//! let now = NaiveDate::from_ymd_opt(2026, 2, 15)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! let this_month = log.dates_in_range_at(RangeToken::OneMonth, now)?;
//! assert_eq!(this_month.len(), 1);
//! # Ok::<(), fitlog::FitlogError>(())
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod range;
pub mod record;

#[cfg(feature = "snapshot")]
pub mod snapshot;

pub use builder::DBBuilder;
pub use db::{AtomicBatch, DB};
pub use error::{FitlogError, Result};

pub type Fitlog = DB;

pub use clock::{Clock, FixedClock, SystemClock};

pub use config::{Config, DbStats, MalformedDatePolicy};

pub use filter::{filter_dates, filter_dates_with_policy};

pub use range::RangeToken;

pub use record::{Workout, parse_date};

#[cfg(feature = "sync")]
pub use db::SyncDB;

#[cfg(feature = "snapshot")]
pub use snapshot::{SnapshotConfig, SnapshotFile};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{DBBuilder, Fitlog, FitlogError, Result};

    pub use crate::{RangeToken, Workout};

    pub use crate::{filter_dates, filter_dates_with_policy};

    pub use crate::{Clock, FixedClock, SystemClock};

    pub use crate::{Config, MalformedDatePolicy};

    #[cfg(feature = "sync")]
    pub use crate::SyncDB;

    pub use chrono::{NaiveDate, NaiveDateTime};
}
