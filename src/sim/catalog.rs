//! Item and wave definitions
//!
//! Loaded once and validated up front; the engine only ever reads them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Gameplay classification attached to every spawned object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnCategory {
    /// Collectible worth points
    Normal,
    /// Must be avoided
    Obstacle,
    /// Pulls collectibles toward the player
    Magnet,
    /// Buff: grow
    Mushroom,
    /// Buff: temporary invisibility
    Hide,
}

impl SpawnCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnCategory::Normal => "Normal",
            SpawnCategory::Obstacle => "Obstacle",
            SpawnCategory::Magnet => "Magnet",
            SpawnCategory::Mushroom => "Mushroom",
            SpawnCategory::Hide => "Hide",
        }
    }

    /// Mushroom and Hide share the buff gate
    #[inline]
    pub fn is_buff(&self) -> bool {
        matches!(self, SpawnCategory::Mushroom | SpawnCategory::Hide)
    }

    /// Categories handled by the Normal/Obstacle gate
    #[inline]
    pub fn is_basic(&self) -> bool {
        matches!(self, SpawnCategory::Normal | SpawnCategory::Obstacle)
    }
}

fn default_one() -> f32 {
    1.0
}

fn default_color() -> u32 {
    0xffffff
}

fn default_size() -> Vec2 {
    Vec2::splat(0.5)
}

/// A spawnable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnItemDefinition {
    /// Asset/prefab handle understood by the entity factory
    pub asset: String,
    /// Relative selection weight (> 0)
    pub weight: f32,
    pub category: SpawnCategory,
    #[serde(default = "default_one")]
    pub speed_multiplier: f32,
    #[serde(default)]
    pub score_value: u32,
    /// Independent per-candidate gate in `[0, 1]`
    #[serde(default = "default_one")]
    pub spawn_chance: f32,
    /// Cosmetic tint, 0xRRGGBB
    #[serde(default = "default_color")]
    pub color: u32,
    /// Full extent of the item's bounding box
    #[serde(default = "default_size")]
    pub size: Vec2,
}

impl SpawnItemDefinition {
    /// Item with neutral multipliers, always eligible, default size
    pub fn new(asset: impl Into<String>, category: SpawnCategory, weight: f32) -> Self {
        Self {
            asset: asset.into(),
            weight,
            category,
            speed_multiplier: 1.0,
            score_value: 0,
            spawn_chance: 1.0,
            color: default_color(),
            size: default_size(),
        }
    }

    pub fn with_score(mut self, score_value: u32) -> Self {
        self.score_value = score_value;
        self
    }

    pub fn with_spawn_chance(mut self, spawn_chance: f32) -> Self {
        self.spawn_chance = spawn_chance;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_speed(mut self, speed_multiplier: f32) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ConfigError::NonPositiveWeight {
                asset: self.asset.clone(),
                weight: self.weight,
            });
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::SpawnChanceOutOfRange {
                asset: self.asset.clone(),
                chance: self.spawn_chance,
            });
        }
        if !(self.size.x > 0.0 && self.size.y > 0.0) || !self.size.is_finite() {
            return Err(ConfigError::InvalidItemSize {
                asset: self.asset.clone(),
                width: self.size.x,
                height: self.size.y,
            });
        }
        Ok(())
    }
}

/// A timed block of spawn cadence and category odds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnWaveDefinition {
    pub name: String,
    /// Seconds before the next wave takes over
    pub duration: f32,
    /// Seconds between standard spawns (before difficulty scaling)
    pub spawn_interval: f32,
    /// Chance the basic gate picks Normal over Obstacle
    pub item_chance: f32,
    #[serde(default)]
    pub magnet_chance: f32,
    #[serde(default)]
    pub buff_item_chance: f32,
    #[serde(default = "default_one")]
    pub speed_multiplier: f32,
    /// Asset handles available in this wave; empty means the whole catalog
    #[serde(default)]
    pub items: Vec<String>,
}

impl SpawnWaveDefinition {
    fn validate(&self) -> Result<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ConfigError::NonPositiveDuration {
                wave: self.name.clone(),
                duration: self.duration,
            });
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(ConfigError::NonPositiveInterval {
                wave: self.name.clone(),
                interval: self.spawn_interval,
            });
        }
        for (field, value) in [
            ("item_chance", self.item_chance),
            ("magnet_chance", self.magnet_chance),
            ("buff_item_chance", self.buff_item_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WaveChanceOutOfRange {
                    wave: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// A wave with its item subset resolved to catalog indices
#[derive(Debug, Clone, PartialEq)]
pub struct Wave {
    pub def: SpawnWaveDefinition,
    /// Indices into [`Catalog::items`]; never empty
    pub available: Vec<usize>,
}

/// Validated, non-empty item catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<SpawnItemDefinition>,
}

impl Catalog {
    pub fn new(items: Vec<SpawnItemDefinition>) -> Result<Self> {
        if items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for item in &items {
            item.validate()?;
        }
        Ok(Self { items })
    }

    #[inline]
    pub fn items(&self) -> &[SpawnItemDefinition] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Borrow the items at `indices`
    pub fn pool(&self, indices: &[usize]) -> Vec<&SpawnItemDefinition> {
        indices.iter().filter_map(|&i| self.items.get(i)).collect()
    }

    /// Validate a wave and resolve its item subset
    pub fn resolve_wave(&self, def: SpawnWaveDefinition) -> Result<Wave> {
        def.validate()?;

        let available = if def.items.is_empty() {
            (0..self.items.len()).collect()
        } else {
            let mut indices = Vec::with_capacity(def.items.len());
            for asset in &def.items {
                let index = self
                    .items
                    .iter()
                    .position(|item| &item.asset == asset)
                    .ok_or_else(|| ConfigError::UnknownItem {
                        wave: def.name.clone(),
                        asset: asset.clone(),
                    })?;
                indices.push(index);
            }
            indices
        };

        Ok(Wave { def, available })
    }

    /// Validate and resolve a whole wave list, preserving order
    pub fn resolve_waves(&self, defs: Vec<SpawnWaveDefinition>) -> Result<Vec<Wave>> {
        defs.into_iter().map(|def| self.resolve_wave(def)).collect()
    }
}
