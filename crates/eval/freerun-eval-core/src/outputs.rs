//! Output contracts from the core engine.
//!
//! Outputs carry this tick's resolved animation states, blended transforms,
//! and goal verdicts, plus a separate list of discrete events. Adapters
//! apply the changes to their host and transport the events.

use serde::{Deserialize, Serialize};

use freerun_api_core::{AnimationOutput, GoalKey, GoalProgress, TransformRecord};

use crate::ids::EntityId;

/// Resolved animation state for one entity this tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationChange {
    pub entity: EntityId,
    pub output: AnimationOutput,
}

/// Blended transform for one entity this tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformChange {
    pub entity: EntityId,
    pub transform: TransformRecord,
}

/// Goal verdict for one sampled counter this tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalChange {
    pub key: GoalKey,
    pub progress: GoalProgress,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// A blend link finished and the cursor advanced.
    LinkCompleted {
        entity: EntityId,
        from: u8,
        to: u8,
    },
    /// A sampled goal met its condition this tick.
    GoalMet {
        key: GoalKey,
    },
    /// Per-entity fault (e.g. an out-of-range blend cursor). The rest of the
    /// batch keeps running.
    Error {
        entity: EntityId,
        message: String,
    },
}

/// Outputs returned by `Engine::update()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub animations: Vec<AnimationChange>,
    #[serde(default)]
    pub transforms: Vec<TransformChange>,
    #[serde(default)]
    pub goals: Vec<GoalChange>,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.animations.clear();
        self.transforms.clear();
        self.goals.clear();
        self.events.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
            && self.transforms.is_empty()
            && self.goals.is_empty()
            && self.events.is_empty()
    }
}
