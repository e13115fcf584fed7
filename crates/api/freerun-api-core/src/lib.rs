//! freerun-api-core: plain data records shared across the freerun evaluation
//! crates (engine-agnostic).
//!
//! This crate defines the records that cross the core's boundary every tick —
//! motion states, animation results, goal verdicts, transform records, and
//! the character input split — with no evaluation logic of its own.

pub mod goal;
pub mod input;
pub mod motion;
pub mod transform;

pub use goal::{CheckKind, GoalKey, GoalProgress, RangeCheckKind};
pub use input::{CharacterInput, LaneTarget, SwipeFlags};
pub use motion::{AnimationOutput, ClipId, MotionState};
pub use transform::TransformRecord;
