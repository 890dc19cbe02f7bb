//! Collaborator interfaces the engine is constructed with
//!
//! The host game owns rendering, physics and input. The engine only needs to
//! know whether the session is running, whether the speed booster is on, and
//! how to turn an item definition into a live object.

use glam::Vec2;

use super::aabb::Aabb;
use super::catalog::{SpawnCategory, SpawnItemDefinition};

/// Whether the game session is currently running
pub trait GameActiveQuery {
    fn is_active(&self) -> bool;
}

impl<F: Fn() -> bool> GameActiveQuery for F {
    fn is_active(&self) -> bool {
        self()
    }
}

/// Speed booster state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Booster {
    pub active: bool,
    pub multiplier: f32,
}

impl Booster {
    pub const OFF: Booster = Booster {
        active: false,
        multiplier: 1.0,
    };

    pub fn on(multiplier: f32) -> Self {
        Self {
            active: true,
            multiplier,
        }
    }

    /// Multiplier to apply, if any
    #[inline]
    pub fn factor(&self) -> Option<f32> {
        self.active.then_some(self.multiplier)
    }
}

impl Default for Booster {
    fn default() -> Self {
        Self::OFF
    }
}

pub trait BoosterQuery {
    fn booster(&self) -> Booster;
}

impl<F: Fn() -> Booster> BoosterQuery for F {
    fn booster(&self) -> Booster {
        self()
    }
}

/// A live object created by the host
pub trait EntityHandle {
    /// True once the host has removed the object
    fn is_destroyed(&self) -> bool;
    /// Current world position
    fn position(&self) -> Vec2;
    /// Current world bounding box
    fn bounds(&self) -> Aabb;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Tag used downstream for scoring and collision handling
    fn set_category(&mut self, category: SpawnCategory);
}

/// Instantiates items into the host world
pub trait EntityFactory {
    type Handle: EntityHandle;

    /// `None` when the host could not create the object
    fn spawn(&mut self, item: &SpawnItemDefinition, position: Vec2) -> Option<Self::Handle>;
}
