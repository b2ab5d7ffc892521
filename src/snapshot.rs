//! Full-state snapshot persistence.
//!
//! A snapshot is the whole record set, ids and insertion order included,
//! encoded with bincode and replaced atomically on every write.

use crate::error::{FitlogError, Result};
use crate::record::Workout;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Snapshot configuration
#[derive(Debug, Clone, Default)]
pub struct SnapshotConfig {
    /// Rewrite the snapshot automatically after this many mutations
    pub auto_snapshot_ops: Option<u64>,
}

/// Handle to a snapshot file on disk.
#[derive(Debug)]
pub struct SnapshotFile {
    path: PathBuf,
    config: SnapshotConfig,
}

/// On-disk record entry. Ids are persisted so references held by callers
/// survive a restart.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotRecord {
    id: Uuid,
    workout: Workout,
}

impl SnapshotFile {
    /// Create a handle for the snapshot at `path`. The file is not touched
    /// until the first read or write.
    pub fn new<P: AsRef<Path>>(path: P, config: SnapshotConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            config,
        }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot configuration
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Read all records from the snapshot, in their persisted insertion
    /// order. A missing file is an empty store, not an error.
    pub fn read_records(&self) -> Result<Vec<(Uuid, Workout)>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let entries: Vec<SnapshotRecord> =
            bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
                FitlogError::SerializationErrorWithContext(format!(
                    "Failed to decode snapshot at {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        Ok(entries.into_iter().map(|r| (r.id, r.workout)).collect())
    }

    /// Replace the snapshot with the given records.
    ///
    /// The new state is written to a sibling temp file first and renamed
    /// into place, so a crash mid-write leaves the previous snapshot intact.
    pub fn write_records(&self, records: &[(Uuid, &Workout)]) -> Result<()> {
        let entries: Vec<SnapshotRecord> = records
            .iter()
            .map(|(id, workout)| SnapshotRecord {
                id: *id,
                workout: (*workout).clone(),
            })
            .collect();

        let tmp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            bincode::serialize_into(&mut writer, &entries).map_err(|e| {
                FitlogError::SerializationErrorWithContext(format!(
                    "Failed to encode snapshot at {}: {}",
                    self.path.display(),
                    e
                ))
            })?;
        }
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
