//! Error types for configuration loading and per-spawn failures

use thiserror::Error;

/// Convenient result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Rejected configuration. Raised at construction time only.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No spawnable items were supplied.
    #[error("spawn catalog is empty")]
    EmptyCatalog,
    /// Item weight is zero, negative or not finite.
    #[error("item '{asset}' has non-positive weight {weight}")]
    NonPositiveWeight {
        /// Asset handle of the offending item.
        asset: String,
        /// Weight as loaded.
        weight: f32,
    },
    /// Item spawn chance outside `[0, 1]`.
    #[error("item '{asset}' has spawn chance {chance} outside [0, 1]")]
    SpawnChanceOutOfRange {
        /// Asset handle of the offending item.
        asset: String,
        /// Chance as loaded.
        chance: f32,
    },
    /// Item bounding box has a zero or negative extent.
    #[error("item '{asset}' has invalid size {width}x{height}")]
    InvalidItemSize {
        /// Asset handle of the offending item.
        asset: String,
        /// Box width.
        width: f32,
        /// Box height.
        height: f32,
    },
    /// Wave duration is zero or negative.
    #[error("wave '{wave}' has non-positive duration {duration}")]
    NonPositiveDuration {
        /// Wave name.
        wave: String,
        /// Duration in seconds.
        duration: f32,
    },
    /// Wave spawn interval is zero or negative.
    #[error("wave '{wave}' has non-positive spawn interval {interval}")]
    NonPositiveInterval {
        /// Wave name.
        wave: String,
        /// Interval in seconds.
        interval: f32,
    },
    /// One of the wave's probability fields is outside `[0, 1]`.
    #[error("wave '{wave}' has {field} = {value} outside [0, 1]")]
    WaveChanceOutOfRange {
        /// Wave name.
        wave: String,
        /// Field name.
        field: &'static str,
        /// Value as loaded.
        value: f32,
    },
    /// A wave's item subset names an asset missing from the catalog.
    #[error("wave '{wave}' references unknown item '{asset}'")]
    UnknownItem {
        /// Wave name.
        wave: String,
        /// Asset handle that could not be resolved.
        asset: String,
    },
    /// An engine setting is out of its valid range.
    #[error("invalid setting {name} = {value}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// Value as loaded.
        value: f32,
    },
    /// The config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for [`crate::config::SpawnConfig`].
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Why a single spawn attempt was skipped. Recovered inside the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnFailure {
    /// The category pool was empty after filtering.
    #[error("no item available for the selected category")]
    SelectionMiss,
    /// Placement produced no candidate at all.
    #[error("no placement candidate")]
    PlacementFailure,
    /// The entity factory returned no handle.
    #[error("entity factory returned no handle")]
    FactoryFailure,
}

impl SpawnFailure {
    /// Whether this failure counts toward the failed-spawn telemetry.
    pub fn is_counted(self) -> bool {
        !matches!(self, SpawnFailure::SelectionMiss)
    }
}
