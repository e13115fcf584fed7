//! Freerun Evaluation Core (engine-agnostic)
//!
//! Deterministic, allocation-light evaluation kernels for the runner
//! character pipeline: the packed-selector ease evaluator, the motion-state →
//! animation resolver, the goal/range progress evaluators, and the sequenced
//! ease/transform blender, plus an Engine facade that maps them over
//! registered entities once per tick.
//!
//! All baked tables (ease-link plans, goal descriptors, max speeds) are
//! immutable after construction and shared read-only; per-entity state is
//! limited to a motion-state pair, a blend cursor, and a transform record.

pub mod config;
pub mod ease;
pub mod engine;
pub mod goals;
pub mod ids;
pub mod inputs;
pub mod math;
pub mod outputs;
pub mod resolver;
pub mod sequence;
pub mod stored_tables;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use ease::{Channel, Ease, EaseFamily, WrapMode};
pub use engine::Engine;
pub use goals::{
    check_float, check_int, check_range_float, check_range_int, GoalFloat, GoalInt,
    GoalRangeFloat, GoalRangeInt, GoalTable, GoalTableError, GoalTime, DEFAULT_TOLERANCE,
};
pub use ids::{EntityId, IdAllocator, PlanId};
pub use inputs::{EntityInput, GoalSample, GoalValue, Inputs, Kinematics};
pub use outputs::{AnimationChange, CoreEvent, GoalChange, Outputs, TransformChange};
pub use resolver::{CharacterState, MaxSpeeds};
pub use sequence::{BlendSample, Cursor, EaseLink, SequenceError, SequencePlan, StepOutcome};
pub use stored_tables::{parse_stored_tables_json, StoredTables, TableError};

pub use freerun_api_core::{
    AnimationOutput, CharacterInput, CheckKind, ClipId, GoalKey, GoalProgress, LaneTarget,
    MotionState, RangeCheckKind, SwipeFlags, TransformRecord,
};
