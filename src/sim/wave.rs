//! Cyclic wave schedule
//!
//! Waves play in order for their configured duration and wrap around. With
//! no waves configured the scheduler runs in disabled mode and always
//! reports a fixed default wave.

use serde::{Deserialize, Serialize};

use super::catalog::{SpawnWaveDefinition, Wave};
use crate::consts::*;
use crate::settings::SpawnSettings;

/// Runtime position in the schedule
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveRuntimeState {
    pub current_index: usize,
    pub elapsed_in_wave: f32,
}

/// Fixed cadence used when the wave list is empty
pub fn default_wave(settings: &SpawnSettings, catalog_len: usize) -> Wave {
    Wave {
        def: SpawnWaveDefinition {
            name: "Default".to_string(),
            duration: f32::INFINITY,
            spawn_interval: settings.default_spawn_interval,
            item_chance: DEFAULT_ITEM_CHANCE,
            magnet_chance: DEFAULT_MAGNET_CHANCE,
            buff_item_chance: DEFAULT_BUFF_ITEM_CHANCE,
            speed_multiplier: 1.0,
            items: Vec::new(),
        },
        available: (0..catalog_len).collect(),
    }
}

#[derive(Debug, Clone)]
pub struct WaveScheduler {
    waves: Vec<Wave>,
    fallback: Wave,
    state: WaveRuntimeState,
}

impl WaveScheduler {
    pub fn new(waves: Vec<Wave>, fallback: Wave) -> Self {
        if waves.is_empty() {
            log::warn!(
                "No waves configured, using fixed cadence of {:.2}s",
                fallback.def.spawn_interval
            );
        }
        Self {
            waves,
            fallback,
            state: WaveRuntimeState::default(),
        }
    }

    /// True when running on the default wave
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.waves.is_empty()
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn state(&self) -> WaveRuntimeState {
        self.state
    }

    pub fn current(&self) -> &Wave {
        self.waves
            .get(self.state.current_index)
            .unwrap_or(&self.fallback)
    }

    /// Fraction of the current wave elapsed, in `[0, 1)`
    pub fn progress(&self) -> f32 {
        if self.is_disabled() {
            return 0.0;
        }
        (self.state.elapsed_in_wave / self.current().def.duration).clamp(0.0, 1.0)
    }

    /// Advance by `dt` seconds. Returns how many wave boundaries were crossed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        if self.is_disabled() || !dt.is_finite() || dt <= 0.0 {
            return 0;
        }

        self.state.elapsed_in_wave += dt;
        let mut crossed: u32 = 0;

        // Whole cycles end on the current wave
        let cycle = self.cycle_duration();
        if self.state.elapsed_in_wave >= cycle {
            let cycles = (self.state.elapsed_in_wave / cycle).floor();
            self.state.elapsed_in_wave %= cycle;
            let skipped = (cycles as u64).saturating_mul(self.waves.len() as u64);
            crossed = u32::try_from(skipped).unwrap_or(u32::MAX);
        }

        loop {
            let duration = self.waves[self.state.current_index].def.duration;
            if self.state.elapsed_in_wave < duration {
                break;
            }
            self.state.elapsed_in_wave -= duration;
            self.state.current_index = (self.state.current_index + 1) % self.waves.len();
            crossed = crossed.saturating_add(1);
        }

        if crossed > 0 {
            log::info!(
                "Wave {} '{}' ({:.1}s, interval {:.2}s)",
                self.state.current_index,
                self.current().def.name,
                self.current().def.duration,
                self.current().def.spawn_interval
            );
        }
        crossed
    }

    /// Time to play every wave once
    fn cycle_duration(&self) -> f32 {
        self.waves.iter().map(|w| w.def.duration).sum()
    }

    pub fn reset(&mut self) {
        self.state = WaveRuntimeState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wave(name: &str, duration: f32, interval: f32) -> Wave {
        Wave {
            def: SpawnWaveDefinition {
                name: name.to_string(),
                duration,
                spawn_interval: interval,
                item_chance: 0.5,
                magnet_chance: 0.0,
                buff_item_chance: 0.0,
                speed_multiplier: 1.0,
                items: Vec::new(),
            },
            available: vec![0],
        }
    }

    fn scheduler(durations: &[f32]) -> WaveScheduler {
        let waves = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| wave(&format!("w{i}"), d, 1.0))
            .collect();
        WaveScheduler::new(waves, default_wave(&SpawnSettings::default(), 1))
    }

    #[test]
    fn test_advances_at_duration() {
        let mut waves = scheduler(&[2.0, 3.0]);
        assert_eq!(waves.advance(1.5), 0);
        assert_eq!(waves.current().def.name, "w0");
        assert!((waves.progress() - 0.75).abs() < 1e-6);

        assert_eq!(waves.advance(0.5), 1);
        assert_eq!(waves.current().def.name, "w1");
        assert_eq!(waves.state().elapsed_in_wave, 0.0);
    }

    #[test]
    fn test_large_step_crosses_several_waves() {
        let mut waves = scheduler(&[1.0, 1.0, 1.0]);
        assert_eq!(waves.advance(4.5), 4);
        assert_eq!(waves.state().current_index, 1);
        assert!((waves.state().elapsed_in_wave - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_huge_step_terminates() {
        let mut waves = scheduler(&[1.0]);
        assert_eq!(waves.advance(1.0e8), 100_000_000);
        assert_eq!(waves.state().current_index, 0);
        assert!(waves.state().elapsed_in_wave < 1.0);

        let mut waves = scheduler(&[2.0, 3.0, 0.5]);
        waves.advance(0.75);
        assert!(waves.advance(1.0e9) > 0);
        let state = waves.state();
        assert!(state.current_index < 3);
        assert!(state.elapsed_in_wave >= 0.0);
        assert!(state.elapsed_in_wave < waves.current().def.duration);
    }

    #[test]
    fn test_empty_list_is_disabled() {
        let settings = SpawnSettings {
            default_spawn_interval: 0.75,
            ..Default::default()
        };
        let mut waves = WaveScheduler::new(Vec::new(), default_wave(&settings, 3));
        assert!(waves.is_disabled());
        assert_eq!(waves.advance(100.0), 0);
        assert_eq!(waves.current().def.name, "Default");
        assert_eq!(waves.current().def.spawn_interval, 0.75);
        assert_eq!(waves.current().available, vec![0, 1, 2]);
        assert_eq!(waves.progress(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut waves = scheduler(&[1.0, 1.0]);
        waves.advance(1.25);
        waves.reset();
        assert_eq!(waves.state(), WaveRuntimeState::default());
    }

    proptest! {
        // Quarter-second multiples keep the float sums exact
        #[test]
        fn prop_full_cycle_returns_to_first(
            quarters in prop::collection::vec(1u32..40, 1..6),
            extra in 0u32..40,
        ) {
            let durations: Vec<f32> = quarters.iter().map(|&q| q as f32 * 0.25).collect();
            let first = durations[0];
            let mut waves = scheduler(&durations);

            let total_quarters: u32 = quarters.iter().sum::<u32>() + extra % quarters[0];
            for _ in 0..total_quarters {
                waves.advance(0.25);
            }

            prop_assert_eq!(waves.state().current_index, 0);
            prop_assert!(waves.state().elapsed_in_wave < first);
        }
    }
}
