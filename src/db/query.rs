//! Dated queries over the store.

use super::DB;
use crate::error::{FitlogError, Result};
use crate::range::RangeToken;
use crate::record::Workout;
use chrono::NaiveDateTime;

impl DB {
    /// Dates of stored records falling inside `range`, computed against the
    /// injected clock. Insertion order is preserved; records with
    /// unparseable dates never appear.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fitlog::{Fitlog, RangeToken, Workout};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut log = Fitlog::memory()?;
    /// log.insert(Workout::new("2026-02-10"))?;
    ///
    /// let recent = log.dates_in_range(RangeToken::ThreeMonths)?;
    /// # let _ = recent;
    /// # Ok(())
    /// # }
    /// ```
    pub fn dates_in_range(&self, range: RangeToken) -> Result<Vec<NaiveDateTime>> {
        let now = self.inner.clock.now();
        self.dates_in_range_at(range, now)
    }

    /// Like [`DB::dates_in_range`], against an explicit reference instant.
    pub fn dates_in_range_at(
        &self,
        range: RangeToken,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        Ok(self
            .inner
            .iter_ordered()
            .filter_map(|(_, item)| item.parsed)
            .filter(|date| range.matches(*date, now))
            .collect())
    }

    /// Full records falling inside `range`, computed against the injected
    /// clock, insertion order preserved.
    pub fn workouts_in_range(&self, range: RangeToken) -> Result<Vec<Workout>> {
        let now = self.inner.clock.now();
        self.workouts_in_range_at(range, now)
    }

    /// Like [`DB::workouts_in_range`], against an explicit reference instant.
    pub fn workouts_in_range_at(
        &self,
        range: RangeToken,
        now: NaiveDateTime,
    ) -> Result<Vec<Workout>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        Ok(self
            .inner
            .iter_ordered()
            .filter_map(|(_, item)| item.parsed.map(|date| (date, &item.workout)))
            .filter(|(date, _)| range.matches(*date, now))
            .map(|(_, workout)| workout.clone())
            .collect())
    }

    /// Records whose date falls within the closed interval `[start, end]`,
    /// in date order. Arguments in either order are accepted.
    pub fn workouts_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, Workout)>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        let (start, end) = if start <= end { (start, end) } else { (end, start) };

        let mut results = Vec::new();
        for (date, ids) in self.inner.date_index.range(start..=end) {
            for id in ids {
                if let Some(item) = self.inner.records.get(id) {
                    results.push((*date, item.workout.clone()));
                }
            }
        }
        Ok(results)
    }

    /// Every stored record in insertion order, malformed ones included.
    pub fn workouts(&self) -> Result<Vec<Workout>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        Ok(self
            .inner
            .iter_ordered()
            .map(|(_, item)| item.workout.clone())
            .collect())
    }

    /// Records retained under the skip policy whose date failed to parse.
    pub fn malformed_workouts(&self) -> Result<Vec<Workout>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        Ok(self
            .inner
            .iter_ordered()
            .filter(|(_, item)| item.parsed.is_none())
            .map(|(_, item)| item.workout.clone())
            .collect())
    }
}
