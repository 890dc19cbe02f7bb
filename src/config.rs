//! Spawn configuration loading
//!
//! Settings, item catalog and wave list travel together as one JSON
//! document. Missing settings fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::settings::SpawnSettings;
use crate::sim::catalog::{SpawnItemDefinition, SpawnWaveDefinition};

/// Built-in catalog and waves
const DEFAULT_CONFIG_JSON: &str = include_str!("../assets/default_spawn.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    #[serde(default)]
    pub settings: SpawnSettings,
    pub items: Vec<SpawnItemDefinition>,
    /// Played in order and cycled; empty means fixed default cadence
    #[serde(default)]
    pub waves: Vec<SpawnWaveDefinition>,
}

impl SpawnConfig {
    pub fn new(items: Vec<SpawnItemDefinition>, waves: Vec<SpawnWaveDefinition>) -> Self {
        Self {
            settings: SpawnSettings::default(),
            items,
            waves,
        }
    }

    pub fn with_settings(mut self, settings: SpawnSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parse a JSON document. Values are validated when the engine is built.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded spawn config from {} ({} items, {} waves)",
            path.display(),
            config.items.len(),
            config.waves.len()
        );
        Ok(config)
    }

    /// The config shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_CONFIG_JSON)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
