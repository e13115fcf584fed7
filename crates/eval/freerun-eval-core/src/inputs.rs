//! Input contracts for the core engine.
//!
//! An external simulation driver builds these once per fixed tick: one
//! kinematic record per registered entity, plus the frame's goal counter
//! samples. The core never mutates them.

use serde::{Deserialize, Serialize};

use freerun_api_core::{CharacterInput, GoalKey};

use crate::ids::EntityId;

/// Per-tick kinematic state of one character, as measured by the external
/// physics/movement layer.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Kinematics {
    /// Raw 2D movement input.
    pub move_vector: [f32; 2],
    /// Magnitude of the character's current velocity.
    pub velocity_magnitude: f32,
    pub is_sprinting: bool,
    /// Orientation quaternion (x,y,z,w); used for wall-run side detection.
    pub rotation: [f32; 4],
    /// Last known wall normal while wall-running.
    pub wall_normal: [f32; 3],
}

impl Default for Kinematics {
    fn default() -> Self {
        Self {
            move_vector: [0.0, 0.0],
            velocity_magnitude: 0.0,
            is_sprinting: false,
            rotation: [0.0, 0.0, 0.0, 1.0],
            wall_normal: [0.0, 0.0, 0.0],
        }
    }
}

/// Everything the core needs about one entity this tick.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct EntityInput {
    pub entity: EntityId,
    pub kinematics: Kinematics,
    /// Swipe/lane input, if this entity is player-driven.
    #[serde(default)]
    pub input: Option<CharacterInput>,
}

/// One sampled counter to score against the goal tables.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalSample {
    pub key: GoalKey,
    pub value: GoalValue,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GoalValue {
    Int(i32),
    Float(f32),
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    #[serde(default)]
    pub entities: Vec<EntityInput>,
    /// Mission/goal counter samples for this tick (global, not per-entity).
    #[serde(default)]
    pub goal_samples: Vec<GoalSample>,
}
