//! Core store implementation for fitlog.
//!
//! This module defines the main `DB` type along with the index plumbing and
//! persistence wiring that power the public `Fitlog` API.

use crate::clock::Clock;
use crate::config::{Config, DbStats};
use crate::error::{FitlogError, Result};
use crate::record::Workout;
#[cfg(feature = "snapshot")]
use crate::snapshot::SnapshotFile;
use chrono::NaiveDateTime;
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
#[cfg(not(feature = "sync"))]
use std::marker::PhantomData;
use uuid::Uuid;

mod batch;
mod internal;
mod query;

#[cfg(feature = "sync")]
mod sync;

pub use batch::AtomicBatch;

#[cfg(feature = "sync")]
pub use sync::SyncDB;

/// Main fitlog store (single-threaded by design).
///
/// The `DB` struct is the core of fitlog, offering:
/// - In-memory storage of workout records in insertion order
/// - Calendar-range queries (`1m`, `3m`, `6m`, `1y`) against an injected clock
/// - Date-interval scans over a secondary date index
/// - Atomic batch operations
/// - Optional full-state snapshot persistence
///
/// # Thread Safety
///
/// **`DB` is NOT thread-safe by default.** It cannot be sent between threads
/// or shared without synchronization. For multi-threaded use, enable the
/// `sync` feature and use `SyncDB`, or wrap the store yourself.
///
/// # Examples
///
/// ```rust
/// use fitlog::{Fitlog, RangeToken, Workout};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut log = Fitlog::memory()?;
///
/// log.insert(Workout::new("2026-02-10").with_title("intervals"))?;
/// log.insert(Workout::new("2025-08-15"))?;
///
/// // Every stored session, insertion order preserved
/// let all = log.dates_in_range(RangeToken::All)?;
/// assert_eq!(all.len(), 2);
/// # Ok(())
/// # }
/// ```
///
/// ## Atomic batching
///
/// ```rust
/// use fitlog::{Fitlog, Workout};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut log = Fitlog::memory()?;
///
/// // All operations succeed or fail together
/// log.atomic(|batch| {
///     batch.insert(Workout::new("2026-02-01"))?;
///     batch.insert(Workout::new("2026-02-03"))?;
///     Ok(())
/// })?;
/// # Ok(())
/// # }
/// ```
pub struct DB {
    pub(crate) inner: DBInner,
    #[cfg(not(feature = "sync"))]
    pub(crate) _not_send_sync: PhantomData<*const ()>,
}

/// A record as held by the store: the original payload plus its parsed
/// date. `parsed` is `None` only for records kept under the skip policy;
/// such records never enter the date index.
#[derive(Debug, Clone)]
pub(crate) struct StoredWorkout {
    pub workout: Workout,
    pub parsed: Option<NaiveDateTime>,
}

pub(crate) struct DBInner {
    /// Record table keyed by id
    pub records: FxHashMap<Uuid, StoredWorkout>,
    /// Insertion order of record ids
    pub order: Vec<Uuid>,
    /// Records indexed by parsed date for interval queries
    pub date_index: BTreeMap<NaiveDateTime, BTreeSet<Uuid>>,
    /// Reference-instant source for dated queries
    pub clock: Box<dyn Clock>,
    /// Snapshot file for persistence
    #[cfg(feature = "snapshot")]
    pub snapshot_file: Option<SnapshotFile>,
    /// Whether the store is closed
    pub closed: bool,
    /// Store statistics
    pub stats: DbStats,
    /// Configuration
    pub config: Config,
    /// Mutations since the last snapshot write
    #[cfg(feature = "snapshot")]
    pub(super) ops_since_snapshot: u64,
}

impl DB {
    /// Creates a new in-memory store with default configuration.
    pub fn memory() -> Result<Self> {
        Self::builder().build()
    }

    /// Create an in-memory store with custom configuration
    pub fn memory_with_config(config: Config) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Opens a store persisted as a snapshot file, creating it if needed.
    ///
    /// The snapshot is loaded on open, restoring records, their ids, and
    /// their insertion order. It is rewritten on [`DB::sync`], [`DB::close`],
    /// and (best effort) on drop.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fitlog::Fitlog;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let path = std::env::temp_dir().join("open_demo.fitlog");
    /// # let _ = std::fs::remove_file(&path);
    /// let mut log = Fitlog::open(&path)?;
    /// # log.close()?;
    /// # std::fs::remove_file(path).ok();
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "snapshot")]
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a snapshot-persisted store with custom configuration.
    #[cfg(feature = "snapshot")]
    pub fn open_with_config<P: AsRef<std::path::Path>>(path: P, config: Config) -> Result<Self> {
        Self::builder()
            .snapshot_path(path.as_ref())
            .config(config)
            .build()
    }

    /// Create a store builder for advanced configuration.
    ///
    /// The builder provides full control over configuration, clock
    /// injection, and persistence paths.
    pub fn builder() -> crate::builder::DBBuilder {
        crate::builder::DBBuilder::new()
    }

    /// Get store statistics
    pub fn stats(&self) -> DbStats {
        self.inner.stats.clone()
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Number of stored records, malformed ones included.
    pub fn len(&self) -> usize {
        self.inner.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.order.is_empty()
    }

    /// Inserts a record and returns its generated id.
    ///
    /// The record's date is parsed up front. Under the `Error` policy an
    /// unparseable date rejects the insert; under `Skip` the record is
    /// stored, counted in [`DbStats::malformed_count`], and excluded from
    /// every dated query.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fitlog::{Fitlog, Workout};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut log = Fitlog::memory()?;
    /// let id = log.insert(Workout::new("2026-02-10"))?;
    /// assert!(log.get(id)?.is_some());
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, workout: Workout) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.insert_with_id(id, workout)?;
        Ok(id)
    }

    /// Inserts a record under a caller-chosen id.
    ///
    /// # Errors
    ///
    /// Returns [`FitlogError::DuplicateId`] if the id is already present.
    pub fn insert_with_id(&mut self, id: Uuid, workout: Workout) -> Result<()> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        let parsed = self.inner.parse_for_insert(&workout)?;
        self.inner.insert_item(id, StoredWorkout { workout, parsed })?;

        #[cfg(feature = "snapshot")]
        self.inner.snapshot_if_due()?;
        Ok(())
    }

    /// Get a record by id
    pub fn get(&self, id: Uuid) -> Result<Option<Workout>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        Ok(self.inner.records.get(&id).map(|s| s.workout.clone()))
    }

    /// Delete a record by id, returning it if present
    pub fn delete(&mut self, id: Uuid) -> Result<Option<Workout>> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        let removed = self.inner.remove_item(&id).map(|s| s.workout);

        #[cfg(feature = "snapshot")]
        if removed.is_some() {
            self.inner.snapshot_if_due()?;
        }
        Ok(removed)
    }

    /// Execute multiple operations atomically
    pub fn atomic<F, R>(&mut self, f: F) -> Result<R>
    where
        F: FnOnce(&mut AtomicBatch) -> Result<R>,
    {
        let mut batch = AtomicBatch::new(&mut self.inner);
        let result = f(&mut batch)?;
        batch.commit()?;

        #[cfg(feature = "snapshot")]
        self.inner.snapshot_if_due()?;
        Ok(result)
    }

    /// Force a snapshot write if persistence is configured.
    ///
    /// Without the `snapshot` feature, or for an in-memory store, this is a
    /// no-op.
    pub fn sync(&mut self) -> Result<()> {
        #[cfg(feature = "snapshot")]
        self.inner.write_snapshot()?;
        Ok(())
    }

    /// Gracefully close the store.
    ///
    /// Writes a final snapshot if persistence is configured and marks the
    /// store closed; any further operation returns
    /// [`FitlogError::DatabaseClosed`].
    ///
    /// **Note:** a snapshot is also written when the store is dropped, so
    /// explicitly calling `close()` is optional but recommended for explicit
    /// error handling.
    pub fn close(&mut self) -> Result<()> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        #[cfg(feature = "snapshot")]
        self.inner.write_snapshot()?;
        self.inner.closed = true;
        Ok(())
    }
}

/// Best-effort snapshot on drop; errors are silently ignored. Use `close()`
/// explicitly when the outcome matters.
impl Drop for DB {
    fn drop(&mut self) {
        if self.inner.closed {
            return;
        }

        #[cfg(feature = "snapshot")]
        let _ = self.inner.write_snapshot();
    }
}

pub use DB as Fitlog;
