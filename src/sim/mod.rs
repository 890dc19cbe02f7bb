//! Deterministic spawn simulation
//!
//! All spawn decisions live here. This module must stay deterministic:
//! - Time only advances through `tick(dt)`
//! - Every random draw goes through an injected `RandomSource`
//! - No rendering or platform dependencies

pub mod aabb;
pub mod catalog;
pub mod difficulty;
pub mod engine;
pub mod event;
pub mod headless;
pub mod host;
pub mod pattern;
pub mod placement;
pub mod registry;
pub mod rng;
pub mod selector;
pub mod wave;

pub use aabb::Aabb;
pub use catalog::{Catalog, SpawnCategory, SpawnItemDefinition, SpawnWaveDefinition, Wave};
pub use difficulty::DifficultyModel;
pub use engine::{SpawnEngine, Telemetry};
pub use event::{SpawnEvent, SpawnSource};
pub use headless::{Body, BodyHandle, HeadlessWorld};
pub use host::{Booster, BoosterQuery, EntityFactory, EntityHandle, GameActiveQuery};
pub use pattern::{PatternKind, PatternSequencer, PatternStep};
pub use placement::{Lane, Placement, PlacementSearch};
pub use registry::{ActiveObjectRecord, ActiveObjectRegistry, OverlapQuery};
pub use rng::{PcgRandom, RandomSource, SequenceRandom};
pub use wave::{WaveRuntimeState, WaveScheduler};
