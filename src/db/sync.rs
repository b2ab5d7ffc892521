//! Thread-safe wrapper for concurrent store access.
//!
//! This module provides `SyncDB`, a thread-safe wrapper around `DB` that uses
//! `Arc<RwLock<DB>>` internally to allow safe concurrent access from multiple
//! threads.
//!
//! # Features
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! fitlog = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use fitlog::{SyncDB, Workout};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let db = SyncDB::memory()?;
//!
//! let db_clone = db.clone();
//! let handle = thread::spawn(move || {
//!     db_clone.insert(Workout::new("2026-02-10")).unwrap();
//! });
//!
//! db.insert(Workout::new("2026-02-11"))?;
//! handle.join().unwrap();
//! # Ok(())
//! # }
//! ```

use super::{AtomicBatch, DB};
use crate::config::{Config, DbStats};
use crate::error::Result;
use crate::range::RangeToken;
use crate::record::Workout;
use chrono::NaiveDateTime;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Thread-safe wrapper around `DB` using `Arc<RwLock<DB>>`.
///
/// Multiple threads can read simultaneously, but writes require exclusive
/// access. Read-heavy workloads perform well; for write-heavy workloads
/// consider a dedicated owner thread with a channel instead.
#[derive(Clone)]
pub struct SyncDB {
    inner: Arc<RwLock<DB>>,
}

impl SyncDB {
    /// Creates a new in-memory store with default configuration.
    pub fn memory() -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(DB::memory()?)),
        })
    }

    /// Creates a new in-memory store with custom configuration.
    pub fn memory_with_config(config: Config) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(DB::memory_with_config(config)?)),
        })
    }

    /// Opens a snapshot-persisted store at the specified path.
    #[cfg(feature = "snapshot")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(DB::open(path)?)),
        })
    }

    /// Opens a snapshot-persisted store with custom configuration.
    #[cfg(feature = "snapshot")]
    pub fn open_with_config<P: AsRef<std::path::Path>>(path: P, config: Config) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(RwLock::new(DB::open_with_config(path, config)?)),
        })
    }

    // ===== Record Operations =====

    /// Inserts a record and returns its generated id.
    pub fn insert(&self, workout: Workout) -> Result<Uuid> {
        self.inner.write().insert(workout)
    }

    /// Inserts a record under a caller-chosen id.
    pub fn insert_with_id(&self, id: Uuid, workout: Workout) -> Result<()> {
        self.inner.write().insert_with_id(id, workout)
    }

    /// Retrieves a record by id.
    pub fn get(&self, id: Uuid) -> Result<Option<Workout>> {
        self.inner.read().get(id)
    }

    /// Deletes a record by id.
    pub fn delete(&self, id: Uuid) -> Result<Option<Workout>> {
        self.inner.write().delete(id)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    // ===== Dated Queries =====

    /// Dates of records inside `range`, against the injected clock.
    pub fn dates_in_range(&self, range: RangeToken) -> Result<Vec<NaiveDateTime>> {
        self.inner.read().dates_in_range(range)
    }

    /// Dates of records inside `range`, against an explicit instant.
    pub fn dates_in_range_at(
        &self,
        range: RangeToken,
        now: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>> {
        self.inner.read().dates_in_range_at(range, now)
    }

    /// Full records inside `range`, against the injected clock.
    pub fn workouts_in_range(&self, range: RangeToken) -> Result<Vec<Workout>> {
        self.inner.read().workouts_in_range(range)
    }

    /// Full records inside `range`, against an explicit instant.
    pub fn workouts_in_range_at(
        &self,
        range: RangeToken,
        now: NaiveDateTime,
    ) -> Result<Vec<Workout>> {
        self.inner.read().workouts_in_range_at(range, now)
    }

    /// Records within the closed date interval `[start, end]`.
    pub fn workouts_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<(NaiveDateTime, Workout)>> {
        self.inner.read().workouts_between(start, end)
    }

    /// Every stored record in insertion order.
    pub fn workouts(&self) -> Result<Vec<Workout>> {
        self.inner.read().workouts()
    }

    /// Records retained under the skip policy whose date failed to parse.
    pub fn malformed_workouts(&self) -> Result<Vec<Workout>> {
        self.inner.read().malformed_workouts()
    }

    // ===== Atomic Operations =====

    /// Executes multiple operations atomically.
    pub fn atomic<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut AtomicBatch) -> Result<R>,
    {
        self.inner.write().atomic(f)
    }

    // ===== Maintenance Operations =====

    /// Forces a snapshot write (if persistence is configured).
    pub fn sync(&self) -> Result<()> {
        self.inner.write().sync()
    }

    /// Closes the store.
    pub fn close(&self) -> Result<()> {
        self.inner.write().close()
    }

    /// Returns store statistics.
    pub fn stats(&self) -> DbStats {
        self.inner.read().stats()
    }

    /// Returns the current configuration.
    pub fn config(&self) -> Config {
        self.inner.read().config().clone()
    }

    /// Acquires a read lock for direct access to the store.
    ///
    /// This allows multiple read operations under a single lock.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, DB> {
        self.inner.read()
    }

    /// Acquires a write lock for direct access to the store.
    ///
    /// This allows multiple write operations under a single lock.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, DB> {
        self.inner.write()
    }
}

// Ensure SyncDB is Send + Sync
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<SyncDB>;
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let db = SyncDB::memory().unwrap();
        let id = db.insert(Workout::new("2026-02-10")).unwrap();
        let fetched = db.get(id).unwrap().unwrap();
        assert_eq!(fetched.date, "2026-02-10");
    }

    #[test]
    fn test_concurrent_reads() {
        let db = SyncDB::memory().unwrap();
        let id = db.insert(Workout::new("2026-02-10")).unwrap();

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let db = db.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        let fetched = db.get(id).unwrap().unwrap();
                        assert_eq!(fetched.date, "2026-02-10");
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_concurrent_writes() {
        let db = SyncDB::memory().unwrap();

        let handles: Vec<_> = (0..5)
            .map(|i| {
                let db = db.clone();
                thread::spawn(move || {
                    for j in 0..20 {
                        let date = format!("2026-01-{:02}", (i * 4 + j % 4) % 28 + 1);
                        db.insert(Workout::new(date)).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = db.stats();
        assert_eq!(stats.record_count, 100);
    }

    #[test]
    fn test_atomic_operations() {
        let db = SyncDB::memory().unwrap();

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let db = db.clone();
                thread::spawn(move || {
                    db.atomic(|batch| {
                        for day in 1..=10 {
                            batch.insert(Workout::new(format!("2026-02-{:02}", day)))?;
                        }
                        Ok(())
                    })
                    .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let stats = db.stats();
        assert_eq!(stats.record_count, 50);
    }

    #[test]
    fn test_clone_shares_state() {
        let db = SyncDB::memory().unwrap();
        let id = db.insert(Workout::new("2026-02-10")).unwrap();

        let db_clone = db.clone();
        assert!(db_clone.get(id).unwrap().is_some());

        let id2 = db_clone.insert(Workout::new("2026-02-11")).unwrap();
        assert!(db.get(id2).unwrap().is_some());
    }

    #[test]
    fn test_close_prevents_operations() {
        let db = SyncDB::memory().unwrap();
        db.insert(Workout::new("2026-02-10")).unwrap();

        db.close().unwrap();

        let result = db.insert(Workout::new("2026-02-11"));
        assert!(result.is_err());
    }
}
