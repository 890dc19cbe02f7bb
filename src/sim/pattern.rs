//! Scripted burst patterns
//!
//! A pattern is a fixed timeline of spawn steps separated by a constant
//! delay. The sequencer is a small state machine advanced by tick time: it
//! emits the steps that fell due and the engine performs them. Only one
//! pattern runs at a time, and normal interval spawning carries on alongside.

use serde::{Deserialize, Serialize};

use super::catalog::{Catalog, SpawnCategory, SpawnItemDefinition};
use crate::consts::BONUS_SCORE_THRESHOLD;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    /// Shower of collectibles across the lane
    Rain,
    /// Alternating left/right edge spawns
    Zigzag,
    /// Spawns tracing a sine across the lane
    Wave,
    /// High-value collectibles only
    BonusTime,
}

impl PatternKind {
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Rain,
        PatternKind::Zigzag,
        PatternKind::Wave,
        PatternKind::BonusTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Rain => "Rain",
            PatternKind::Zigzag => "Zigzag",
            PatternKind::Wave => "Wave",
            PatternKind::BonusTime => "BonusTime",
        }
    }

    /// Number of spawn steps in the timeline
    pub fn steps(&self) -> usize {
        match self {
            PatternKind::Rain => 8,
            PatternKind::Zigzag => 5,
            PatternKind::Wave => 6,
            PatternKind::BonusTime => 4,
        }
    }

    /// Seconds between consecutive steps
    pub fn delay(&self) -> f32 {
        match self {
            PatternKind::Rain => 0.25,
            PatternKind::Zigzag => 0.4,
            PatternKind::Wave => 0.3,
            PatternKind::BonusTime => 0.5,
        }
    }

    /// Whether steps go through placement search.
    ///
    /// Zigzag and Wave use scripted positions and may overlap on purpose.
    pub fn overlap_checked(&self) -> bool {
        matches!(self, PatternKind::Rain | PatternKind::BonusTime)
    }

    /// Time from the first step until the pattern clears
    pub fn duration(&self) -> f32 {
        self.steps() as f32 * self.delay()
    }
}

/// Items a pattern draws from
///
/// Rain: every Normal item. BonusTime: Normal items worth more than
/// [`BONUS_SCORE_THRESHOLD`]. Zigzag and Wave: the whole catalog.
pub fn pattern_pool(kind: PatternKind, catalog: &Catalog) -> Vec<&SpawnItemDefinition> {
    let items = catalog.items().iter();
    match kind {
        PatternKind::Rain => items
            .filter(|item| item.category == SpawnCategory::Normal)
            .collect(),
        PatternKind::BonusTime => items
            .filter(|item| {
                item.category == SpawnCategory::Normal && item.score_value > BONUS_SCORE_THRESHOLD
            })
            .collect(),
        PatternKind::Zigzag | PatternKind::Wave => items.collect(),
    }
}

/// One step that fell due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternStep {
    pub kind: PatternKind,
    pub index: usize,
}

impl PatternStep {
    /// Fixed x for scripted steps, `None` when placement search decides
    pub fn scripted_x(&self, range_x: f32) -> Option<f32> {
        match self.kind {
            PatternKind::Zigzag => {
                let side = if self.index % 2 == 0 { -1.0 } else { 1.0 };
                Some(side * 0.8 * range_x)
            }
            PatternKind::Wave => Some(range_x * (self.index as f32 * 0.5).sin()),
            PatternKind::Rain | PatternKind::BonusTime => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePattern {
    kind: PatternKind,
    next_step: usize,
    /// Seconds until the next step (or until the pattern clears)
    countdown: f32,
}

/// Single-flight pattern runner
#[derive(Debug, Clone, Default)]
pub struct PatternSequencer {
    active: Option<ActivePattern>,
}

impl PatternSequencer {
    pub fn new() -> Self {
        Self { active: None }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<PatternKind> {
        self.active.map(|a| a.kind)
    }

    /// Start `kind` unless a pattern is already running
    ///
    /// The first step is due immediately; call [`advance`](Self::advance)
    /// with `dt = 0` to emit it on the same tick.
    pub fn try_start(&mut self, kind: PatternKind) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActivePattern {
            kind,
            next_step: 0,
            countdown: 0.0,
        });
        true
    }

    /// Advance by `dt`, pushing due steps to `out`
    ///
    /// Returns the pattern kind if it completed during this call.
    pub fn advance(&mut self, dt: f32, out: &mut Vec<PatternStep>) -> Option<PatternKind> {
        let pattern = self.active.as_mut()?;
        pattern.countdown -= dt.max(0.0);

        while pattern.countdown <= 0.0 {
            if pattern.next_step >= pattern.kind.steps() {
                let kind = pattern.kind;
                self.active = None;
                return Some(kind);
            }
            out.push(PatternStep {
                kind: pattern.kind,
                index: pattern.next_step,
            });
            pattern.next_step += 1;
            pattern.countdown += pattern.kind.delay();
        }
        None
    }

    /// Drop the running pattern without emitting anything further
    pub fn cancel(&mut self) -> Option<PatternKind> {
        self.active.take().map(|a| a.kind)
    }
}
