//! Headless host world
//!
//! Bodies fall at their assigned velocity and are destroyed once they drop
//! below the kill line. Enough of a world to drive the engine from the demo
//! binary and from tests without a renderer.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::aabb::Aabb;
use super::catalog::{SpawnCategory, SpawnItemDefinition};
use super::host::{EntityFactory, EntityHandle};

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: u32,
    pub asset: String,
    pub category: Option<SpawnCategory>,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub destroyed: bool,
}

/// Shared handle to a body owned by [`HeadlessWorld`]
#[derive(Debug, Clone)]
pub struct BodyHandle(Rc<RefCell<Body>>);

impl BodyHandle {
    pub fn id(&self) -> u32 {
        self.0.borrow().id
    }

    pub fn snapshot(&self) -> Body {
        self.0.borrow().clone()
    }

    /// Remove the body from play (e.g. the player picked it up)
    pub fn destroy(&self) {
        self.0.borrow_mut().destroyed = true;
    }
}

impl EntityHandle for BodyHandle {
    fn is_destroyed(&self) -> bool {
        self.0.borrow().destroyed
    }

    fn position(&self) -> Vec2 {
        self.0.borrow().pos
    }

    fn bounds(&self) -> Aabb {
        let body = self.0.borrow();
        Aabb::from_center_size(body.pos, body.size)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.0.borrow_mut().vel = velocity;
    }

    fn set_category(&mut self, category: SpawnCategory) {
        self.0.borrow_mut().category = Some(category);
    }
}

#[derive(Debug)]
pub struct HeadlessWorld {
    bodies: Vec<BodyHandle>,
    kill_y: f32,
    /// Refuse to spawn beyond this many live bodies
    capacity: Option<usize>,
    next_id: u32,
}

impl HeadlessWorld {
    pub fn new(kill_y: f32) -> Self {
        Self {
            bodies: Vec::new(),
            kill_y,
            capacity: None,
            next_id: 1,
        }
    }

    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Integrate positions and drop bodies below the kill line
    pub fn step(&mut self, dt: f32) {
        for handle in &self.bodies {
            let mut body = handle.0.borrow_mut();
            if body.destroyed {
                continue;
            }
            let vel = body.vel;
            body.pos += vel * dt;
            if body.pos.y < self.kill_y {
                body.destroyed = true;
            }
        }
        self.bodies.retain(|h| !h.is_destroyed());
    }

    pub fn live_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    pub fn clear(&mut self) {
        for handle in &self.bodies {
            handle.destroy();
        }
        self.bodies.clear();
    }
}

impl EntityFactory for HeadlessWorld {
    type Handle = BodyHandle;

    fn spawn(&mut self, item: &SpawnItemDefinition, position: Vec2) -> Option<BodyHandle> {
        if self.capacity.is_some_and(|cap| self.bodies.len() >= cap) {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;

        let handle = BodyHandle(Rc::new(RefCell::new(Body {
            id,
            asset: item.asset.clone(),
            category: None,
            pos: position,
            vel: Vec2::ZERO,
            size: item.size,
            destroyed: false,
        })));
        self.bodies.push(handle.clone());
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_fall_and_die() {
        let mut world = HeadlessWorld::new(-1.0);
        let item = SpawnItemDefinition::new("coin", SpawnCategory::Normal, 1.0);
        let mut handle = world.spawn(&item, Vec2::new(0.0, 1.0)).unwrap();
        handle.set_velocity(Vec2::new(0.0, -1.0));

        world.step(1.0);
        assert_eq!(handle.position(), Vec2::new(0.0, 0.0));
        assert_eq!(world.live_count(), 1);

        world.step(1.5);
        assert!(handle.is_destroyed());
        assert_eq!(world.live_count(), 0);
    }

    #[test]
    fn test_capacity_limit() {
        let mut world = HeadlessWorld::new(-10.0).with_capacity_limit(1);
        let item = SpawnItemDefinition::new("coin", SpawnCategory::Normal, 1.0);
        assert!(world.spawn(&item, Vec2::ZERO).is_some());
        assert!(world.spawn(&item, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_handle_tags_and_bounds() {
        let mut world = HeadlessWorld::new(-10.0);
        let item = SpawnItemDefinition::new("rock", SpawnCategory::Obstacle, 1.0).with_size(Vec2::new(1.0, 2.0));
        let mut handle = world.spawn(&item, Vec2::new(1.0, 1.0)).unwrap();
        handle.set_category(SpawnCategory::Obstacle);

        let body = handle.snapshot();
        assert_eq!(body.category, Some(SpawnCategory::Obstacle));
        assert_eq!(handle.bounds().size(), Vec2::new(1.0, 2.0));
        assert_eq!(handle.id(), 1);
    }
}
