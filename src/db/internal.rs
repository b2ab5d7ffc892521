//! Internal store operations and index maintenance.

use super::{DBInner, StoredWorkout};
use crate::clock::Clock;
use crate::config::{Config, DbStats, MalformedDatePolicy};
use crate::error::{FitlogError, Result};
use crate::record::Workout;
use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use uuid::Uuid;

impl DBInner {
    pub(crate) fn new_with_config(config: &Config, clock: Box<dyn Clock>) -> Self {
        Self {
            records: FxHashMap::default(),
            order: Vec::new(),
            date_index: BTreeMap::new(),
            clock,
            #[cfg(feature = "snapshot")]
            snapshot_file: None,
            closed: false,
            stats: DbStats::default(),
            config: config.clone(),
            #[cfg(feature = "snapshot")]
            ops_since_snapshot: 0,
        }
    }

    /// Parse a record's date according to the configured policy.
    ///
    /// Returns `Ok(None)` for an unparseable date under the skip policy;
    /// the record is stored but kept out of the date index.
    pub(crate) fn parse_for_insert(&self, workout: &Workout) -> Result<Option<NaiveDateTime>> {
        match workout.parsed_date() {
            Ok(date) => Ok(Some(date)),
            Err(err) => match self.config.malformed_dates {
                MalformedDatePolicy::Skip => {
                    log::warn!("Storing record with unparseable date: {}", err);
                    Ok(None)
                }
                MalformedDatePolicy::Error => Err(err),
            },
        }
    }

    fn add_date_index(&mut self, id: Uuid, date: NaiveDateTime) {
        let ids_at_date = self.date_index.entry(date).or_default();
        ids_at_date.insert(id);

        const DATE_CLUSTER_WARN_THRESHOLD: usize = 10_000;
        if ids_at_date.len() == DATE_CLUSTER_WARN_THRESHOLD {
            log::warn!(
                "Large date cluster detected: {} records share the instant {}.",
                ids_at_date.len(),
                date
            );
        }
    }

    fn remove_date_index(&mut self, id: &Uuid, item: &StoredWorkout) {
        if let Some(date) = item.parsed
            && let Some(ids) = self.date_index.get_mut(&date)
        {
            ids.remove(id);
            if ids.is_empty() {
                self.date_index.remove(&date);
            }
        }
    }

    /// Insert a record into the store
    pub(crate) fn insert_item(&mut self, id: Uuid, item: StoredWorkout) -> Result<()> {
        if self.records.contains_key(&id) {
            return Err(FitlogError::DuplicateId(id));
        }

        let parsed = item.parsed;
        if parsed.is_none() {
            self.stats.malformed_count += 1;
        }

        self.records.insert(id, item);
        self.order.push(id);
        if let Some(date) = parsed {
            self.add_date_index(id, date);
        }

        self.stats.record_count = self.records.len();
        self.stats.operations_count += 1;
        #[cfg(feature = "snapshot")]
        {
            self.ops_since_snapshot += 1;
        }
        Ok(())
    }

    /// Remove a record from the store
    pub(crate) fn remove_item(&mut self, id: &Uuid) -> Option<StoredWorkout> {
        let item = self.records.remove(id)?;

        self.order.retain(|entry| entry != id);
        self.remove_date_index(id, &item);
        if item.parsed.is_none() {
            self.stats.malformed_count = self.stats.malformed_count.saturating_sub(1);
        }

        self.stats.record_count = self.records.len();
        self.stats.operations_count += 1;
        #[cfg(feature = "snapshot")]
        {
            self.ops_since_snapshot += 1;
        }
        Some(item)
    }

    /// Records in insertion order, as (id, record) pairs.
    pub(crate) fn iter_ordered(&self) -> impl Iterator<Item = (&Uuid, &StoredWorkout)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|item| (id, item)))
    }

    /// Write the snapshot if persistence is configured.
    #[cfg(feature = "snapshot")]
    pub(crate) fn write_snapshot(&mut self) -> Result<()> {
        if let Some(ref snapshot_file) = self.snapshot_file {
            let records: Vec<(Uuid, &Workout)> = self
                .order
                .iter()
                .filter_map(|id| self.records.get(id).map(|item| (*id, &item.workout)))
                .collect();
            snapshot_file.write_records(&records)?;
            self.ops_since_snapshot = 0;
        }
        Ok(())
    }

    /// Write the snapshot when the configured mutation interval has elapsed.
    #[cfg(feature = "snapshot")]
    pub(crate) fn snapshot_if_due(&mut self) -> Result<()> {
        let due = self
            .snapshot_file
            .as_ref()
            .and_then(|file| file.config().auto_snapshot_ops)
            .is_some_and(|auto_ops| self.ops_since_snapshot >= auto_ops);
        if due {
            self.write_snapshot()?;
        }
        Ok(())
    }

    /// Replay a snapshot's records into an empty store, re-validating each
    /// date against the configured policy.
    #[cfg(feature = "snapshot")]
    pub(crate) fn load_from_snapshot(&mut self, file: &crate::snapshot::SnapshotFile) -> Result<()> {
        for (id, workout) in file.read_records()? {
            let parsed = self.parse_for_insert(&workout)?;
            self.insert_item(id, StoredWorkout { workout, parsed })?;
        }

        // Replayed records are not new mutations
        self.stats.operations_count = 0;
        self.ops_since_snapshot = 0;
        Ok(())
    }
}
