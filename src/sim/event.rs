//! Events recorded by the engine for the host to consume

use glam::Vec2;

use super::catalog::SpawnCategory;
use super::pattern::PatternKind;
use crate::error::SpawnFailure;

/// Maximum undrained events kept; older ones are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// What triggered a spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSource {
    /// Interval-driven spawn
    Standard,
    /// Step of a scripted pattern
    Pattern(PatternKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpawnEvent {
    Spawned {
        asset: String,
        category: SpawnCategory,
        position: Vec2,
        velocity: Vec2,
        source: SpawnSource,
    },
    Skipped {
        failure: SpawnFailure,
        source: SpawnSource,
    },
    WaveChanged {
        index: usize,
        name: String,
    },
    PatternStarted(PatternKind),
    PatternFinished(PatternKind),
    /// Session went inactive mid-pattern
    PatternAbandoned(PatternKind),
}
