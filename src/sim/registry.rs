//! Registry of recently spawned objects
//!
//! Holds the spawn-time bounding box of every object that can still collide
//! with a new spawn. Records leave the registry when the object is
//! destroyed, when it is older than the track window, or when it has fallen
//! below the despawn line, whichever happens first.

use super::aabb::Aabb;
use super::host::EntityHandle;

/// Overlap queries used by placement
///
/// Implemented by the registry and by plain box slices, so a spatial index
/// can replace the linear scan without touching placement.
pub trait OverlapQuery {
    /// Does `candidate`, grown by `padding` on every side, hit any box?
    fn overlaps(&self, candidate: &Aabb, padding: f32) -> bool;
    /// How many boxes does the grown `candidate` hit?
    fn overlap_count(&self, candidate: &Aabb, padding: f32) -> usize;
}

impl OverlapQuery for [Aabb] {
    fn overlaps(&self, candidate: &Aabb, padding: f32) -> bool {
        let grown = candidate.inflated(padding);
        self.iter().any(|b| grown.intersects(b))
    }

    fn overlap_count(&self, candidate: &Aabb, padding: f32) -> usize {
        let grown = candidate.inflated(padding);
        self.iter().filter(|b| grown.intersects(b)).count()
    }
}

/// One tracked object
#[derive(Debug, Clone)]
pub struct ActiveObjectRecord<H> {
    pub handle: H,
    /// Bounding box captured when the object spawned
    pub bounds: Aabb,
    /// Game time of the spawn
    pub spawned_at: f32,
}

/// Dense list of tracked objects, pruned with swap-and-pop
#[derive(Debug, Clone)]
pub struct ActiveObjectRegistry<H> {
    records: Vec<ActiveObjectRecord<H>>,
    track_window: f32,
}

impl<H: EntityHandle> ActiveObjectRegistry<H> {
    pub fn new(track_window: f32) -> Self {
        Self {
            records: Vec::new(),
            track_window,
        }
    }

    pub fn register(&mut self, handle: H, bounds: Aabb, now: f32) {
        self.records.push(ActiveObjectRecord {
            handle,
            bounds,
            spawned_at: now,
        });
    }

    /// Drop dead, expired and off-screen records. Returns how many were removed.
    pub fn prune(&mut self, now: f32, despawn_y: f32) -> usize {
        let before = self.records.len();
        let mut i = 0;
        while i < self.records.len() {
            let record = &self.records[i];
            let stale = record.handle.is_destroyed()
                || now - record.spawned_at > self.track_window
                || record.handle.position().y < despawn_y;
            if stale {
                // Order is irrelevant; the moved-in record is checked next
                self.records.swap_remove(i);
            } else {
                i += 1;
            }
        }
        before - self.records.len()
    }

    /// See [`OverlapQuery::overlaps`]
    pub fn query(&self, candidate: &Aabb, padding: f32) -> bool {
        self.overlaps(candidate, padding)
    }

    /// See [`OverlapQuery::overlap_count`]
    pub fn query_count(&self, candidate: &Aabb, padding: f32) -> usize {
        self.overlap_count(candidate, padding)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[ActiveObjectRecord<H>] {
        &self.records
    }
}

impl<H> OverlapQuery for ActiveObjectRegistry<H> {
    fn overlaps(&self, candidate: &Aabb, padding: f32) -> bool {
        let grown = candidate.inflated(padding);
        self.records.iter().any(|r| grown.intersects(&r.bounds))
    }

    fn overlap_count(&self, candidate: &Aabb, padding: f32) -> usize {
        let grown = candidate.inflated(padding);
        self.records
            .iter()
            .filter(|r| grown.intersects(&r.bounds))
            .count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::sim::catalog::SpawnCategory;

    /// Minimal handle whose position and liveness tests can poke
    #[derive(Debug, Clone)]
    pub(crate) struct Marker {
        pub pos: Rc<Cell<Vec2>>,
        pub destroyed: Rc<Cell<bool>>,
        pub size: Vec2,
    }

    impl Marker {
        pub(crate) fn at(pos: Vec2) -> Self {
            Self {
                pos: Rc::new(Cell::new(pos)),
                destroyed: Rc::new(Cell::new(false)),
                size: Vec2::splat(0.5),
            }
        }
    }

    impl EntityHandle for Marker {
        fn is_destroyed(&self) -> bool {
            self.destroyed.get()
        }
        fn position(&self) -> Vec2 {
            self.pos.get()
        }
        fn bounds(&self) -> Aabb {
            Aabb::from_center_size(self.pos.get(), self.size)
        }
        fn set_velocity(&mut self, _velocity: Vec2) {}
        fn set_category(&mut self, _category: SpawnCategory) {}
    }

    fn register_at(registry: &mut ActiveObjectRegistry<Marker>, pos: Vec2, now: f32) -> Marker {
        let marker = Marker::at(pos);
        let bounds = marker.bounds();
        registry.register(marker.clone(), bounds, now);
        marker
    }

    #[test]
    fn test_query_hits_and_misses() {
        let mut registry = ActiveObjectRegistry::new(3.0);
        register_at(&mut registry, Vec2::new(0.0, 5.0), 0.0);

        let near = Aabb::from_center_size(Vec2::new(0.3, 5.0), Vec2::splat(0.5));
        let far = Aabb::from_center_size(Vec2::new(2.0, 5.0), Vec2::splat(0.5));
        assert!(registry.query(&near, 0.0));
        assert!(!registry.query(&far, 0.0));
        assert_eq!(registry.query_count(&near, 0.0), 1);
    }

    #[test]
    fn test_padding_turns_near_miss_into_hit() {
        let mut registry = ActiveObjectRegistry::new(3.0);
        register_at(&mut registry, Vec2::new(0.0, 5.0), 0.0);

        // Gap of 0.1 between the boxes
        let candidate = Aabb::from_center_size(Vec2::new(0.6, 5.0), Vec2::splat(0.5));
        assert!(!registry.query(&candidate, 0.0));
        assert!(!registry.query(&candidate, 0.04));
        assert!(registry.query(&candidate, 0.15));
    }

    #[test]
    fn test_prune_expired() {
        let mut registry = ActiveObjectRegistry::new(3.0);
        register_at(&mut registry, Vec2::new(0.0, 5.0), 0.0);
        register_at(&mut registry, Vec2::new(1.0, 5.0), 2.0);

        assert_eq!(registry.prune(3.0, -6.0), 0);
        assert_eq!(registry.prune(3.5, -6.0), 1);
        assert_eq!(registry.len(), 1);

        let probe = Aabb::from_center_size(Vec2::new(0.0, 5.0), Vec2::splat(0.5));
        assert!(!registry.query(&probe, 0.0));
    }

    #[test]
    fn test_prune_below_despawn_regardless_of_age() {
        let mut registry = ActiveObjectRegistry::new(100.0);
        let marker = register_at(&mut registry, Vec2::new(0.0, 5.0), 0.0);
        marker.pos.set(Vec2::new(0.0, -7.0));

        assert_eq!(registry.prune(0.1, -6.0), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_prune_destroyed() {
        let mut registry = ActiveObjectRegistry::new(100.0);
        let a = register_at(&mut registry, Vec2::new(-1.0, 5.0), 0.0);
        register_at(&mut registry, Vec2::new(0.0, 5.0), 0.0);
        let c = register_at(&mut registry, Vec2::new(1.0, 5.0), 0.0);
        a.destroyed.set(true);
        c.destroyed.set(true);

        assert_eq!(registry.prune(0.0, -6.0), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.records()[0].handle.position(), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_box_slice_query() {
        let boxes = [
            Aabb::new(Vec2::new(-1.0, 0.0), Vec2::new(0.0, 1.0)),
            Aabb::new(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 1.0)),
        ];
        let candidate = Aabb::new(Vec2::new(-0.2, 0.2), Vec2::new(0.2, 0.8));
        assert_eq!(boxes[..].overlap_count(&candidate, 0.0), 2);
    }
}
