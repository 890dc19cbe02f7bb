//! Spawn orchestration
//!
//! [`SpawnEngine::tick`] is called once per fixed simulation step. Each tick
//! prunes the registry, advances waves and difficulty, runs any active
//! pattern, and on interval expiry either starts a pattern or performs one
//! standard spawn (select, place, instantiate, register).
//!
//! No spawn failure escapes a tick: a miss is logged, counted and retried
//! on the next interval.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use super::catalog::{Catalog, SpawnItemDefinition};
use super::difficulty::DifficultyModel;
use super::event::{MAX_PENDING_EVENTS, SpawnEvent, SpawnSource};
use super::host::{BoosterQuery, EntityFactory, EntityHandle, GameActiveQuery};
use super::pattern::{PatternKind, PatternSequencer, PatternStep, pattern_pool};
use super::placement::{Lane, PlacementSearch};
use super::registry::ActiveObjectRegistry;
use super::rng::{PcgRandom, RandomSource};
use super::selector;
use super::wave::{WaveScheduler, default_wave};
use crate::config::SpawnConfig;
use crate::error::{Result, SpawnFailure};
use crate::fall_velocity;
use crate::settings::SpawnSettings;

/// Read-only snapshot for HUDs and debugging
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Telemetry {
    pub game_time: f32,
    pub wave_index: usize,
    pub wave_name: String,
    /// Fraction of the current wave elapsed, `[0, 1)`
    pub wave_progress: f32,
    pub difficulty: f32,
    pub spawned: u64,
    pub failed: u64,
    /// Objects currently tracked for overlap
    pub live_objects: usize,
    pub pattern: Option<PatternKind>,
}

pub struct SpawnEngine<F: EntityFactory, R: RandomSource = PcgRandom> {
    settings: SpawnSettings,
    catalog: Catalog,
    lane: Lane,
    difficulty: DifficultyModel,
    placement: PlacementSearch,
    waves: WaveScheduler,
    registry: ActiveObjectRegistry<F::Handle>,
    sequencer: PatternSequencer,

    factory: F,
    rng: R,
    game_active: Box<dyn GameActiveQuery>,
    booster: Box<dyn BoosterQuery>,

    game_time: f32,
    spawn_timer: f32,
    difficulty_multiplier: f32,
    spawned: u64,
    failed: u64,
    events: VecDeque<SpawnEvent>,
    /// Reused buffer for due pattern steps
    due_steps: Vec<PatternStep>,
}

impl<F: EntityFactory, R: RandomSource> SpawnEngine<F, R> {
    /// Validate `config` and build an engine around the host collaborators
    pub fn new(
        config: SpawnConfig,
        factory: F,
        rng: R,
        game_active: impl GameActiveQuery + 'static,
        booster: impl BoosterQuery + 'static,
    ) -> Result<Self> {
        let SpawnConfig {
            settings,
            items,
            waves,
        } = config;

        settings.validate()?;
        let catalog = Catalog::new(items)?;
        let waves = catalog.resolve_waves(waves)?;
        let fallback = default_wave(&settings, catalog.len());

        log::info!(
            "Spawn engine ready: {} items, {} waves, lane ±{:.2} at y={:.2}",
            catalog.len(),
            waves.len(),
            settings.range_x,
            settings.spawn_y
        );

        Ok(Self {
            lane: Lane::from_settings(&settings),
            difficulty: DifficultyModel::new(settings.difficulty_rate, settings.difficulty_cap),
            placement: PlacementSearch::from_settings(&settings),
            waves: WaveScheduler::new(waves, fallback),
            registry: ActiveObjectRegistry::new(settings.track_window),
            sequencer: PatternSequencer::new(),
            settings,
            catalog,

            factory,
            rng,
            game_active: Box::new(game_active),
            booster: Box::new(booster),

            game_time: 0.0,
            spawn_timer: 0.0,
            difficulty_multiplier: 1.0,
            spawned: 0,
            failed: 0,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
            due_steps: Vec::new(),
        })
    }

    /// Advance the engine by one step of `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        if !self.game_active.is_active() {
            if let Some(kind) = self.sequencer.cancel() {
                log::info!("Pattern {} abandoned, session inactive", kind.as_str());
                self.push_event(SpawnEvent::PatternAbandoned(kind));
            }
            return;
        }
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        self.game_time += dt;
        self.registry.prune(self.game_time, self.settings.despawn_y);

        if self.waves.advance(dt) > 0 {
            let index = self.waves.state().current_index;
            let name = self.waves.current().def.name.clone();
            self.push_event(SpawnEvent::WaveChanged { index, name });
        }
        self.difficulty_multiplier = self.difficulty.compute(self.game_time);

        self.run_pattern(dt);

        self.spawn_timer += dt;
        let interval = self.waves.current().def.spawn_interval / self.difficulty_multiplier;
        if self.spawn_timer >= interval {
            self.spawn_timer = 0.0;
            if !self.sequencer.is_active()
                && self.rng.next_f32() < self.settings.special_pattern_chance
            {
                let last = PatternKind::ALL.len() - 1;
                let pick = self.rng.range_usize(0, PatternKind::ALL.len()).min(last);
                self.start_pattern(PatternKind::ALL[pick]);
            } else if let Err(failure) = self.spawn_standard() {
                self.record_failure(failure, SpawnSource::Standard);
            }
        }
    }

    /// Start `kind` now, emitting its first step on this tick
    ///
    /// Returns false if a pattern is already running or the pattern has no
    /// items to draw from (e.g. BonusTime without high-value collectibles).
    pub fn start_pattern(&mut self, kind: PatternKind) -> bool {
        if self.sequencer.is_active() {
            return false;
        }
        if pattern_pool(kind, &self.catalog).is_empty() {
            log::debug!("Pattern {} skipped, no eligible items", kind.as_str());
            return false;
        }
        if !self.sequencer.try_start(kind) {
            return false;
        }

        log::info!(
            "Pattern {} started ({} steps over {:.2}s)",
            kind.as_str(),
            kind.steps(),
            kind.duration()
        );
        self.push_event(SpawnEvent::PatternStarted(kind));
        self.run_pattern(0.0);
        true
    }

    fn run_pattern(&mut self, dt: f32) {
        let mut due = std::mem::take(&mut self.due_steps);
        let finished = self.sequencer.advance(dt, &mut due);

        for step in due.drain(..) {
            let source = SpawnSource::Pattern(step.kind);
            if let Err(failure) = self.spawn_pattern_step(step) {
                self.record_failure(failure, source);
            }
        }
        self.due_steps = due;

        if let Some(kind) = finished {
            log::info!("Pattern {} finished", kind.as_str());
            self.push_event(SpawnEvent::PatternFinished(kind));
        }
    }

    fn spawn_standard(&mut self) -> std::result::Result<(), SpawnFailure> {
        let wave = self.waves.current();
        let pool = self.catalog.pool(&wave.available);
        let item = selector::select(&pool, &wave.def, &mut self.rng)
            .ok_or(SpawnFailure::SelectionMiss)?;

        let placement = self
            .placement
            .find(item.size, &self.lane, &self.registry, &mut self.rng)
            .ok_or(SpawnFailure::PlacementFailure)?;
        if placement.fallback {
            log::debug!(
                "Placement fell back for '{}' ({} overlaps)",
                item.asset,
                placement.overlaps
            );
        }

        let velocity = fall_velocity(
            self.settings.base_speed,
            item.speed_multiplier,
            wave.def.speed_multiplier,
            self.difficulty_multiplier,
            self.booster.booster().factor(),
        );
        instantiate(
            &mut self.factory,
            &mut self.registry,
            item,
            placement.position,
            velocity,
            self.game_time,
        )?;

        self.spawned += 1;
        log::debug!(
            "Spawned '{}' ({}) at x={:.2}, vy={:.2}",
            item.asset,
            item.category.as_str(),
            placement.position.x,
            velocity.y
        );
        let event = SpawnEvent::Spawned {
            asset: item.asset.clone(),
            category: item.category,
            position: placement.position,
            velocity,
            source: SpawnSource::Standard,
        };
        push_bounded(&mut self.events, event);
        Ok(())
    }

    fn spawn_pattern_step(&mut self, step: PatternStep) -> std::result::Result<(), SpawnFailure> {
        let pool = pattern_pool(step.kind, &self.catalog);
        let item = match step.kind {
            PatternKind::Rain => selector::weighted_select(&pool, &mut self.rng),
            PatternKind::Zigzag | PatternKind::Wave | PatternKind::BonusTime => {
                selector::uniform_select(&pool, &mut self.rng)
            }
        }
        .ok_or(SpawnFailure::SelectionMiss)?;

        let position = match step.scripted_x(self.lane.range_x) {
            Some(x) => self.lane.point(x),
            None => {
                self.placement
                    .find(item.size, &self.lane, &self.registry, &mut self.rng)
                    .ok_or(SpawnFailure::PlacementFailure)?
                    .position
            }
        };

        let velocity = fall_velocity(
            self.settings.base_speed,
            item.speed_multiplier,
            self.waves.current().def.speed_multiplier,
            self.difficulty_multiplier,
            self.booster.booster().factor(),
        );
        instantiate(
            &mut self.factory,
            &mut self.registry,
            item,
            position,
            velocity,
            self.game_time,
        )?;

        self.spawned += 1;
        log::debug!(
            "{} step {}: '{}' at x={:.2}",
            step.kind.as_str(),
            step.index,
            item.asset,
            position.x
        );
        let event = SpawnEvent::Spawned {
            asset: item.asset.clone(),
            category: item.category,
            position,
            velocity,
            source: SpawnSource::Pattern(step.kind),
        };
        push_bounded(&mut self.events, event);
        Ok(())
    }

    fn record_failure(&mut self, failure: SpawnFailure, source: SpawnSource) {
        log::debug!("Spawn skipped ({source:?}): {failure}");
        if failure.is_counted() {
            self.failed += 1;
        }
        self.push_event(SpawnEvent::Skipped { failure, source });
    }

    fn push_event(&mut self, event: SpawnEvent) {
        push_bounded(&mut self.events, event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SpawnEvent> {
        self.events.drain(..).collect()
    }

    /// Reset all runtime state; configuration is kept
    pub fn restart(&mut self) {
        if let Some(kind) = self.sequencer.cancel() {
            log::debug!("Pattern {} dropped on restart", kind.as_str());
        }
        self.registry.clear();
        self.waves.reset();
        self.game_time = 0.0;
        self.spawn_timer = 0.0;
        self.difficulty_multiplier = 1.0;
        self.spawned = 0;
        self.failed = 0;
        self.events.clear();
        log::info!("Spawn engine restarted");
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            game_time: self.game_time,
            wave_index: self.waves.state().current_index,
            wave_name: self.waves.current().def.name.clone(),
            wave_progress: self.waves.progress(),
            difficulty: self.difficulty_multiplier,
            spawned: self.spawned,
            failed: self.failed,
            live_objects: self.registry.len(),
            pattern: self.sequencer.active_kind(),
        }
    }

    pub fn settings(&self) -> &SpawnSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn registry(&self) -> &ActiveObjectRegistry<F::Handle> {
        &self.registry
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Host access to its own world, e.g. to step bodies between ticks
    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    #[inline]
    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    #[inline]
    pub fn difficulty(&self) -> f32 {
        self.difficulty_multiplier
    }

    #[inline]
    pub fn is_pattern_active(&self) -> bool {
        self.sequencer.is_active()
    }
}

impl<F: EntityFactory> SpawnEngine<F, PcgRandom> {
    /// Restart and replay the random sequence of `seed`
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.rng.reseed(seed);
        self.restart();
        log::info!("Random sequence reseeded with {:#x}", self.rng.seed());
    }
}

/// Create the entity, set its motion and tag, and start tracking it
fn instantiate<F: EntityFactory>(
    factory: &mut F,
    registry: &mut ActiveObjectRegistry<F::Handle>,
    item: &SpawnItemDefinition,
    position: Vec2,
    velocity: Vec2,
    now: f32,
) -> std::result::Result<(), SpawnFailure> {
    let mut handle = factory
        .spawn(item, position)
        .ok_or(SpawnFailure::FactoryFailure)?;
    handle.set_velocity(velocity);
    handle.set_category(item.category);
    let bounds = handle.bounds();
    registry.register(handle, bounds, now);
    Ok(())
}

fn push_bounded(events: &mut VecDeque<SpawnEvent>, event: SpawnEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        events.pop_front();
    }
    events.push_back(event);
}
