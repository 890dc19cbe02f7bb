//! Layered item selection
//!
//! Three gates are tried in order, and the first one that fires decides the
//! category pool:
//! 1. buff gate (Mushroom / Hide) on `buff_item_chance`
//! 2. magnet gate on `magnet_chance`
//! 3. Normal vs Obstacle on `item_chance`
//!
//! Inside a pool, items are picked by weight after an independent
//! `spawn_chance` roll per item.

use super::catalog::{SpawnCategory, SpawnItemDefinition, SpawnWaveDefinition};
use super::rng::RandomSource;

/// Pick the next item for a standard spawn
///
/// `available` is the wave's item pool. Returns `None` when the chosen
/// basic category has no items (a selection miss).
pub fn select<'a, R: RandomSource>(
    available: &[&'a SpawnItemDefinition],
    wave: &SpawnWaveDefinition,
    rng: &mut R,
) -> Option<&'a SpawnItemDefinition> {
    let u = rng.next_f32();
    if u < wave.buff_item_chance {
        let buffs: Vec<_> = available
            .iter()
            .copied()
            .filter(|item| item.category.is_buff())
            .collect();
        if !buffs.is_empty() {
            return weighted_select(&buffs, rng);
        }
    }

    let u = rng.next_f32();
    if u < wave.magnet_chance {
        let magnets: Vec<_> = available
            .iter()
            .copied()
            .filter(|item| item.category == SpawnCategory::Magnet)
            .collect();
        if !magnets.is_empty() {
            return weighted_select(&magnets, rng);
        }
    }

    let u = rng.next_f32();
    let wanted = if u < wave.item_chance {
        SpawnCategory::Normal
    } else {
        SpawnCategory::Obstacle
    };
    let pool: Vec<_> = available
        .iter()
        .copied()
        .filter(|item| item.category.is_basic() && item.category == wanted)
        .collect();
    weighted_select(&pool, rng)
}

/// Weighted pick with a per-item spawn chance filter
///
/// Items failing their `spawn_chance` roll are dropped first; if every item
/// fails, the roll is ignored so the chance gate alone never blocks a spawn.
pub fn weighted_select<'a, R: RandomSource>(
    items: &[&'a SpawnItemDefinition],
    rng: &mut R,
) -> Option<&'a SpawnItemDefinition> {
    if items.is_empty() {
        return None;
    }

    let passed: Vec<&'a SpawnItemDefinition> = items
        .iter()
        .copied()
        .filter(|item| rng.next_f32() < item.spawn_chance)
        .collect();
    let candidates: &[&'a SpawnItemDefinition] = if passed.is_empty() { items } else { &passed };

    let total: f32 = candidates.iter().map(|item| item.weight.max(0.0)).sum();
    if total <= 0.0 {
        return candidates.last().copied();
    }

    let draw = rng.next_f32() * total;
    let mut cumulative = 0.0;
    for &item in candidates {
        if item.weight <= 0.0 {
            continue;
        }
        cumulative += item.weight;
        if cumulative >= draw {
            return Some(item);
        }
    }
    // Float rounding can leave the draw just above the final sum
    candidates.last().copied()
}

/// Uniform pick over a pool, ignoring weights and spawn chances
pub fn uniform_select<'a, R: RandomSource>(
    items: &[&'a SpawnItemDefinition],
    rng: &mut R,
) -> Option<&'a SpawnItemDefinition> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.range_usize(0, items.len())).copied()
}
