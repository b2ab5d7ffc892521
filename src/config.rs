//! Store configuration and statistics.
//!
//! The configuration is designed to be easily serializable and loadable
//! from JSON, TOML, or other formats while keeping complexity minimal.

use serde::de::Error;
use serde::{Deserialize, Serialize};

/// How a record whose `date` string fails to parse is treated.
///
/// A malformed date is never compared silently: it is either skipped with a
/// logged warning or surfaced as an explicit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MalformedDatePolicy {
    /// Keep the record out of dated results and log a warning (default).
    #[default]
    Skip,
    /// Fail the whole operation with [`crate::FitlogError::InvalidDate`].
    Error,
}

/// Store configuration.
///
/// # Example
///
/// ```rust
/// use fitlog::{Config, MalformedDatePolicy};
///
/// let config = Config::default();
///
/// // Load from JSON
/// let json = r#"{
///     "malformed_dates": "error"
/// }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.malformed_dates, MalformedDatePolicy::Error);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Policy for records with unparseable dates.
    #[serde(default)]
    pub malformed_dates: MalformedDatePolicy,

    /// Write a snapshot automatically after this many mutations
    /// (None disables auto-snapshotting; `sync()` and `close()` still write).
    #[cfg(feature = "snapshot")]
    #[serde(default)]
    pub snapshot_auto_ops: Option<u64>,
}

impl Config {
    pub fn with_malformed_dates(mut self, policy: MalformedDatePolicy) -> Self {
        self.malformed_dates = policy;
        self
    }

    /// Snapshot automatically after every `ops` mutations.
    #[cfg(feature = "snapshot")]
    pub fn with_snapshot_auto_ops(mut self, ops: u64) -> Self {
        assert!(ops > 0, "Auto-snapshot interval must be greater than zero");
        self.snapshot_auto_ops = Some(ops);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        #[cfg(feature = "snapshot")]
        if let Some(ops) = self.snapshot_auto_ops
            && ops == 0
        {
            return Err("Auto-snapshot interval must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Store statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbStats {
    /// Number of records currently stored
    pub record_count: usize,
    /// Records retained under [`MalformedDatePolicy::Skip`] whose date
    /// failed to parse; these never appear in dated queries
    pub malformed_count: usize,
    /// Total number of mutations performed
    pub operations_count: u64,
}
