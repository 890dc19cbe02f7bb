//! Spawn engine settings
//!
//! Construction-time constants. Immutable once an engine is built.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, Result};

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSettings {
    // === Lane ===
    /// Half width of the spawn lane (x in `[-range_x, range_x]`)
    pub range_x: f32,
    /// Fixed spawn height
    pub spawn_y: f32,
    /// Records below this y are dropped from the registry
    pub despawn_y: f32,

    // === Motion ===
    /// Base fall speed (units/s) before multipliers
    pub base_speed: f32,

    // === Difficulty ===
    /// Multiplier growth per second of game time
    pub difficulty_rate: f32,
    /// Upper bound of the difficulty multiplier
    pub difficulty_cap: f32,

    // === Cadence ===
    /// Spawn interval used when no waves are configured
    pub default_spawn_interval: f32,
    /// Chance that an expired interval starts a pattern instead
    pub special_pattern_chance: f32,

    // === Placement ===
    /// Seconds a spawned object stays relevant for overlap checks
    pub track_window: f32,
    /// Per-side margin added around candidate boxes
    pub placement_padding: f32,
    /// Random placement attempts before falling back
    pub max_placement_attempts: u32,
    /// Evenly spaced fallback candidates scored by overlap count
    pub fallback_candidates: u32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            range_x: LANE_HALF_WIDTH,
            spawn_y: SPAWN_Y,
            despawn_y: DESPAWN_Y,

            base_speed: BASE_FALL_SPEED,

            difficulty_rate: DIFFICULTY_RATE,
            difficulty_cap: DIFFICULTY_CAP,

            default_spawn_interval: DEFAULT_SPAWN_INTERVAL,
            special_pattern_chance: SPECIAL_PATTERN_CHANCE,

            track_window: TRACK_WINDOW,
            placement_padding: PLACEMENT_PADDING,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            fallback_candidates: FALLBACK_CANDIDATES,
        }
    }
}

impl SpawnSettings {
    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        positive("range_x", self.range_x)?;
        positive("default_spawn_interval", self.default_spawn_interval)?;
        positive("track_window", self.track_window)?;
        non_negative("base_speed", self.base_speed)?;
        non_negative("difficulty_rate", self.difficulty_rate)?;
        non_negative("placement_padding", self.placement_padding)?;
        finite("spawn_y", self.spawn_y)?;
        finite("despawn_y", self.despawn_y)?;

        if !self.difficulty_cap.is_finite() || self.difficulty_cap < 1.0 {
            return Err(ConfigError::InvalidSetting {
                name: "difficulty_cap",
                value: self.difficulty_cap,
            });
        }
        if !(0.0..=1.0).contains(&self.special_pattern_chance) {
            return Err(ConfigError::InvalidSetting {
                name: "special_pattern_chance",
                value: self.special_pattern_chance,
            });
        }
        if self.despawn_y >= self.spawn_y {
            return Err(ConfigError::InvalidSetting {
                name: "despawn_y",
                value: self.despawn_y,
            });
        }
        // fallback_candidates = 0 is allowed: placement may then fail and
        // the engine counts it like any other placement failure
        Ok(())
    }
}

fn finite(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting { name, value })
    }
}
