//! Goal comparison kinds and the progress verdict record.

use serde::{Deserialize, Serialize};

/// Key of a goal descriptor inside a baked goal table.
pub type GoalKey = u16;

/// Scalar comparison applied by a goal against a single target value.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    GreaterOrEqual,
    GreaterThan,
    LessOrEqual,
    LessThan,
    Equals,
    NotEqual,
}

/// Comparison applied by a goal against a [lower, upper] range.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum RangeCheckKind {
    Between,
    NotBetween,
}

/// Verdict of a goal evaluation: whether the condition is met and a
/// continuous [0,1] estimate of how close the current value is to meeting it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub met: bool,
    pub fraction: f32,
}

impl GoalProgress {
    /// Build a verdict, clamping the fraction into [0,1]. Every evaluation
    /// branch funnels through here so the clamp cannot be forgotten.
    #[inline]
    pub fn new(met: bool, fraction: f32) -> Self {
        Self {
            met,
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    /// Binary verdict: full credit when met, none otherwise.
    #[inline]
    pub fn binary(met: bool) -> Self {
        Self {
            met,
            fraction: if met { 1.0 } else { 0.0 },
        }
    }
}
