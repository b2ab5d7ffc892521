//! Atomic batch operations.

use super::{DBInner, StoredWorkout};
use crate::error::{FitlogError, Result};
use crate::record::Workout;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use uuid::Uuid;

/// Atomic batch. All operations succeed or all fail.
///
/// Operations are staged and validated before anything is applied, so a
/// failing commit leaves the store untouched.
pub struct AtomicBatch<'a> {
    inner: &'a mut DBInner,
    operations: Vec<BatchOperation>,
}

#[derive(Debug, Clone)]
enum BatchOperation {
    Insert {
        id: Uuid,
        workout: Workout,
        parsed: Option<NaiveDateTime>,
    },
    Delete {
        id: Uuid,
    },
}

impl<'a> AtomicBatch<'a> {
    pub(crate) fn new(inner: &'a mut DBInner) -> Self {
        Self {
            inner,
            operations: Vec::new(),
        }
    }

    /// Stage a record insert under a generated id, returned immediately.
    ///
    /// Date validation happens at stage time: under the `Error` policy a
    /// malformed date fails here, before anything is applied.
    pub fn insert(&mut self, workout: Workout) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.insert_with_id(id, workout)?;
        Ok(id)
    }

    /// Stage a record insert under a caller-chosen id.
    pub fn insert_with_id(&mut self, id: Uuid, workout: Workout) -> Result<()> {
        let parsed = self.inner.parse_for_insert(&workout)?;
        self.operations.push(BatchOperation::Insert {
            id,
            workout,
            parsed,
        });
        Ok(())
    }

    /// Stage a record deletion. Deleting an absent id is a no-op at commit.
    pub fn delete(&mut self, id: Uuid) -> Result<()> {
        self.operations.push(BatchOperation::Delete { id });
        Ok(())
    }

    pub(crate) fn commit(self) -> Result<()> {
        if self.inner.closed {
            return Err(FitlogError::DatabaseClosed);
        }

        // First pass: validate ids against current state and earlier staged
        // operations, so nothing is applied if any insert would collide.
        let mut staged: HashSet<Uuid> = HashSet::new();
        let mut removed: HashSet<Uuid> = HashSet::new();
        for operation in &self.operations {
            match operation {
                BatchOperation::Insert { id, .. } => {
                    let exists = staged.contains(id)
                        || (self.inner.records.contains_key(id) && !removed.contains(id));
                    if exists {
                        return Err(FitlogError::DuplicateId(*id));
                    }
                    staged.insert(*id);
                    removed.remove(id);
                }
                BatchOperation::Delete { id } => {
                    staged.remove(id);
                    removed.insert(*id);
                }
            }
        }

        // Second pass: apply. Inserts cannot fail after validation.
        for operation in self.operations {
            match operation {
                BatchOperation::Insert {
                    id,
                    workout,
                    parsed,
                } => {
                    self.inner.insert_item(id, StoredWorkout { workout, parsed })?;
                }
                BatchOperation::Delete { id } => {
                    self.inner.remove_item(&id);
                }
            }
        }

        Ok(())
    }
}
