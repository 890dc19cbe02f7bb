//! Spawn placement search
//!
//! First-fit random sampling across the lane, then a minimum-overlap pick
//! from a fixed set of evenly spaced fallback positions. Spawning is never
//! blocked by crowding: under pressure the search accepts some overlap.

use glam::Vec2;

use super::aabb::Aabb;
use super::registry::OverlapQuery;
use super::rng::RandomSource;
use crate::settings::SpawnSettings;

/// Horizontal spawn range at a fixed height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// x in `[-range_x, range_x]`
    pub range_x: f32,
    pub spawn_y: f32,
}

impl Lane {
    pub fn from_settings(settings: &SpawnSettings) -> Self {
        Self {
            range_x: settings.range_x,
            spawn_y: settings.spawn_y,
        }
    }

    #[inline]
    pub fn point(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.spawn_y)
    }
}

/// Outcome of a successful search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    /// Random attempts consumed (equal to max attempts when the fallback ran)
    pub attempts: u32,
    /// Registry boxes the chosen candidate overlaps (0 unless fallback)
    pub overlaps: usize,
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementSearch {
    pub max_attempts: u32,
    pub fallback_candidates: u32,
    /// Per-side margin, so candidate boxes grow by `2 × padding` per axis
    pub padding: f32,
}

impl PlacementSearch {
    pub fn new(max_attempts: u32, fallback_candidates: u32, padding: f32) -> Self {
        Self {
            max_attempts,
            fallback_candidates,
            padding,
        }
    }

    pub fn from_settings(settings: &SpawnSettings) -> Self {
        Self::new(
            settings.max_placement_attempts,
            settings.fallback_candidates,
            settings.placement_padding,
        )
    }

    /// Find a spawn position for an item of full extent `size`
    ///
    /// Returns `None` only when every random attempt overlapped and there
    /// are no fallback candidates to score. Never mutates the registry.
    pub fn find<Q, R>(&self, size: Vec2, lane: &Lane, registry: &Q, rng: &mut R) -> Option<Placement>
    where
        Q: OverlapQuery + ?Sized,
        R: RandomSource,
    {
        for attempt in 1..=self.max_attempts {
            let x = rng.range_f32(-lane.range_x, lane.range_x);
            let position = lane.point(x);
            let candidate = Aabb::from_center_size(position, size);
            if !registry.overlaps(&candidate, self.padding) {
                return Some(Placement {
                    position,
                    attempts: attempt,
                    overlaps: 0,
                    fallback: false,
                });
            }
        }

        let mut best: Option<(Vec2, usize)> = None;
        for position in self.fallback_positions(lane) {
            let candidate = Aabb::from_center_size(position, size);
            let count = registry.overlap_count(&candidate, self.padding);
            // Strictly-less keeps the first candidate on ties
            if best.is_none_or(|(_, best_count)| count < best_count) {
                best = Some((position, count));
            }
        }

        best.map(|(position, overlaps)| Placement {
            position,
            attempts: self.max_attempts,
            overlaps,
            fallback: true,
        })
    }

    /// Lane positions scored when random sampling is exhausted
    pub fn fallback_positions(&self, lane: &Lane) -> impl Iterator<Item = Vec2> + '_ {
        let n = self.fallback_candidates;
        let slot = 2.0 * lane.range_x / n.max(1) as f32;
        let lane = *lane;
        (0..n).map(move |k| lane.point(-lane.range_x + (k as f32 + 0.5) * slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{PcgRandom, SequenceRandom};

    fn lane() -> Lane {
        Lane {
            range_x: 2.5,
            spawn_y: 6.0,
        }
    }

    #[test]
    fn test_empty_registry_first_attempt() {
        let search = PlacementSearch::new(15, 8, 0.1);
        let registry: Vec<Aabb> = Vec::new();
        let mut rng = PcgRandom::new(3);
        for _ in 0..50 {
            let placement = search
                .find(Vec2::splat(0.5), &lane(), registry.as_slice(), &mut rng)
                .unwrap();
            assert_eq!(placement.attempts, 1);
            assert!(!placement.fallback);
            assert!(placement.position.x.abs() <= 2.5);
            assert_eq!(placement.position.y, 6.0);
        }
    }

    #[test]
    fn test_full_lane_record_uses_fallback() {
        let search = PlacementSearch::new(1, 8, 0.1);
        let registry = vec![Aabb::new(Vec2::new(-3.0, 5.0), Vec2::new(3.0, 7.0))];
        let mut rng = SequenceRandom::constant(0.5);

        let placement = search
            .find(Vec2::splat(0.5), &lane(), registry.as_slice(), &mut rng)
            .expect("fallback must always produce a position");
        assert!(placement.fallback);
        assert_eq!(placement.attempts, 1);
        assert_eq!(placement.overlaps, 1);
        // All fallbacks tie at one overlap, the first wins
        assert!((placement.position.x - (-2.5 + 0.3125)).abs() < 1e-5);
    }

    #[test]
    fn test_fallback_picks_minimum_overlap() {
        let search = PlacementSearch::new(15, 8, 0.1);
        // Left 3/4 of the lane crowded twice over, right edge crowded once
        let registry = vec![
            Aabb::new(Vec2::new(-3.0, 5.0), Vec2::new(1.0, 7.0)),
            Aabb::new(Vec2::new(-3.0, 5.0), Vec2::new(1.0, 7.0)),
            Aabb::new(Vec2::new(1.0, 5.0), Vec2::new(3.0, 7.0)),
        ];
        let mut rng = PcgRandom::new(11);

        let placement = search
            .find(Vec2::splat(0.5), &lane(), registry.as_slice(), &mut rng)
            .unwrap();
        assert!(placement.fallback);
        assert_eq!(placement.overlaps, 1);
        assert!(placement.position.x > 1.0);
        assert_eq!(placement.attempts, 15);
    }

    #[test]
    fn test_no_fallback_candidates_fails() {
        let search = PlacementSearch::new(3, 0, 0.1);
        let registry = vec![Aabb::new(Vec2::new(-3.0, 5.0), Vec2::new(3.0, 7.0))];
        let mut rng = PcgRandom::new(5);
        assert!(search
            .find(Vec2::splat(0.5), &lane(), registry.as_slice(), &mut rng)
            .is_none());
    }

    #[test]
    fn test_finds_the_gap() {
        let search = PlacementSearch::new(200, 8, 0.1);
        // Only x in roughly [0.45, 1.05] is clear for a 0.5 wide item
        let registry = vec![
            Aabb::new(Vec2::new(-3.0, 5.0), Vec2::new(0.1, 7.0)),
            Aabb::new(Vec2::new(1.4, 5.0), Vec2::new(3.0, 7.0)),
        ];
        let mut rng = PcgRandom::new(99);
        let placement = search
            .find(Vec2::splat(0.5), &lane(), registry.as_slice(), &mut rng)
            .unwrap();
        assert!(!placement.fallback);
        assert!(placement.position.x > 0.1 && placement.position.x < 1.4);
    }

    #[test]
    fn test_fallback_positions_span_lane() {
        let search = PlacementSearch::new(15, 8, 0.1);
        let xs: Vec<f32> = search.fallback_positions(&lane()).map(|p| p.x).collect();
        assert_eq!(xs.len(), 8);
        assert!(xs[0] > -2.5 && xs[7] < 2.5);
        assert!((xs[0] + xs[7]).abs() < 1e-5);
    }
}
