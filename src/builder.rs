//! Store builder for flexible configuration
//!
//! This module provides a builder pattern for creating stores with advanced
//! configuration options including clock injection and custom persistence
//! paths.

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::{DB, DBInner};
use crate::error::{FitlogError, Result};
#[cfg(feature = "snapshot")]
use crate::snapshot::{SnapshotConfig, SnapshotFile};
#[cfg(feature = "snapshot")]
use std::path::PathBuf;

/// Builder for store configuration with clock injection and custom
/// persistence paths.
#[derive(Debug)]
pub struct DBBuilder {
    #[cfg(feature = "snapshot")]
    snapshot_path: Option<PathBuf>,
    config: Config,
    clock: Option<Box<dyn Clock>>,
    in_memory: bool,
}

impl DBBuilder {
    /// Create a new builder with default in-memory configuration.
    pub fn new() -> Self {
        Self {
            #[cfg(feature = "snapshot")]
            snapshot_path: None,
            config: Config::default(),
            clock: None,
            in_memory: true,
        }
    }

    /// Set the snapshot path for persistence. File is created if needed and
    /// loaded on startup.
    #[cfg(feature = "snapshot")]
    pub fn snapshot_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.snapshot_path = Some(path.into());
        self.in_memory = false;
        self
    }

    /// Configure for in-memory storage with no persistence.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        #[cfg(feature = "snapshot")]
        {
            self.snapshot_path = None;
        }
        self
    }

    /// Set the store configuration (malformed-date policy, etc.).
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Inject the reference-instant source used by dated queries.
    ///
    /// Defaults to [`SystemClock`]; tests pin a
    /// [`crate::FixedClock`] here.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Build the store. Opens the persistence file if configured and loads
    /// state.
    pub fn build(self) -> Result<DB> {
        self.config
            .validate()
            .map_err(FitlogError::InvalidInput)?;

        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        #[allow(unused_mut)]
        let mut inner = DBInner::new_with_config(&self.config, clock);

        #[cfg(feature = "snapshot")]
        if !self.in_memory
            && let Some(snapshot_path) = self.snapshot_path
        {
            let snapshot_config = SnapshotConfig {
                auto_snapshot_ops: self.config.snapshot_auto_ops,
            };
            let snapshot_file = SnapshotFile::new(&snapshot_path, snapshot_config);
            inner.load_from_snapshot(&snapshot_file)?;
            inner.snapshot_file = Some(snapshot_file);
        }

        Ok(DB {
            inner,
            #[cfg(not(feature = "sync"))]
            _not_send_sync: std::marker::PhantomData,
        })
    }
}

impl Default for DBBuilder {
    fn default() -> Self {
        Self::new()
    }
}
