//! Drop Spawn - procedural spawn engine for a vertical-scrolling collect/avoid game
//!
//! Core modules:
//! - `sim`: Deterministic spawn simulation (waves, difficulty, placement, patterns)
//! - `settings`: Engine tuning constants
//! - `config`: JSON loading of settings, item catalog and wave list
//! - `error`: Configuration and per-spawn failure types

pub mod config;
pub mod error;
pub mod settings;
pub mod sim;

pub use config::SpawnConfig;
pub use error::{ConfigError, SpawnFailure};
pub use settings::SpawnSettings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Lane dimensions (world units)
    pub const LANE_HALF_WIDTH: f32 = 2.5;
    pub const SPAWN_Y: f32 = 6.0;
    pub const DESPAWN_Y: f32 = -6.0;

    /// Base fall speed before item/wave/difficulty multipliers
    pub const BASE_FALL_SPEED: f32 = 2.0;

    /// Difficulty grows linearly with game time up to the cap
    pub const DIFFICULTY_RATE: f32 = 0.01;
    pub const DIFFICULTY_CAP: f32 = 2.5;

    /// Cadence used when no waves are configured
    pub const DEFAULT_SPAWN_INTERVAL: f32 = 1.0;
    pub const DEFAULT_ITEM_CHANCE: f32 = 0.7;
    pub const DEFAULT_MAGNET_CHANCE: f32 = 0.05;
    pub const DEFAULT_BUFF_ITEM_CHANCE: f32 = 0.05;

    /// Chance an expired interval starts a scripted pattern
    pub const SPECIAL_PATTERN_CHANCE: f32 = 0.1;

    /// Registry / placement
    pub const TRACK_WINDOW: f32 = 3.0;
    pub const PLACEMENT_PADDING: f32 = 0.1;
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 15;
    pub const FALLBACK_CANDIDATES: u32 = 8;

    /// BonusTime only spawns Normal items worth more than this
    pub const BONUS_SCORE_THRESHOLD: u32 = 15;
}

/// Fall velocity for a freshly spawned object
///
/// Pure function of the multipliers in effect at spawn time. `booster` is
/// `None` when the booster is inactive.
#[inline]
pub fn fall_velocity(
    base_speed: f32,
    item_multiplier: f32,
    wave_multiplier: f32,
    difficulty: f32,
    booster: Option<f32>,
) -> Vec2 {
    let speed = base_speed * item_multiplier * wave_multiplier * difficulty * booster.unwrap_or(1.0);
    Vec2::new(0.0, -speed)
}
