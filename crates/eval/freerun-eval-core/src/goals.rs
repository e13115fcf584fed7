//! Goal/range progress evaluation and the baked goal tables.
//!
//! Every comparison yields both a met/not-met verdict and a continuous [0,1]
//! progress estimate that approaches 1 as the current value approaches
//! satisfying the condition. Integer goals compare exactly; float goals use a
//! tolerance band (defaulting to [`DEFAULT_TOLERANCE`] when the baked value
//! is non-positive).
//!
//! Malformed ranges (`upper <= lower`) degrade to binary progress at
//! evaluation time; [`GoalTable::validate`] rejects them at load time instead
//! so they never reach a live tick.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use freerun_api_core::{CheckKind, GoalKey, GoalProgress, RangeCheckKind};

/// Tolerance applied to float comparisons when the descriptor carries none.
pub const DEFAULT_TOLERANCE: f32 = 1e-3;

#[inline]
fn effective_tolerance(tolerance: f32) -> f32 {
    if tolerance > 0.0 {
        tolerance
    } else {
        DEFAULT_TOLERANCE
    }
}

/// Evaluate a scalar comparison over integers.
pub fn check_int(check: CheckKind, current: i32, target: i32) -> GoalProgress {
    match check {
        CheckKind::GreaterOrEqual => {
            let met = current >= target;
            if target > 0 {
                GoalProgress::new(met, (current as f32 / target as f32).min(1.0))
            } else if target < 0 {
                let fraction = if met {
                    1.0
                } else {
                    1.0 + current as f32 / target.abs() as f32
                };
                GoalProgress::new(met, fraction)
            } else {
                GoalProgress::binary(met)
            }
        }
        CheckKind::GreaterThan => {
            let met = current > target;
            if target > 0 {
                GoalProgress::new(met, (current as f32 / (target + 1) as f32).min(1.0))
            } else if target < 0 {
                let fraction = if met {
                    1.0
                } else {
                    1.0 + current as f32 / target.abs() as f32
                };
                GoalProgress::new(met, fraction)
            } else {
                GoalProgress::binary(met)
            }
        }
        CheckKind::LessOrEqual => {
            let met = current <= target;
            if met {
                GoalProgress::new(true, 1.0)
            } else {
                let overshoot = (current - target) as f32;
                GoalProgress::new(false, 1.0 - overshoot / target.abs().max(1) as f32)
            }
        }
        CheckKind::LessThan => {
            let met = current < target;
            if met {
                GoalProgress::new(true, 1.0)
            } else {
                let overshoot = (current - target + 1) as f32;
                GoalProgress::new(false, 1.0 - overshoot / target.abs().max(1) as f32)
            }
        }
        CheckKind::Equals => {
            let met = current == target;
            if target == 0 {
                let fraction = if met {
                    1.0
                } else {
                    1.0 - current.abs() as f32 * 0.1
                };
                GoalProgress::new(met, fraction)
            } else if met {
                GoalProgress::new(true, 1.0)
            } else {
                let distance = (current - target).abs() as f32;
                GoalProgress::new(false, 1.0 - distance / target.abs() as f32)
            }
        }
        // No partial credit for avoidance goals.
        CheckKind::NotEqual => GoalProgress::binary(current != target),
    }
}

/// Evaluate a scalar comparison over floats with a tolerance band.
pub fn check_float(check: CheckKind, current: f32, target: f32, tolerance: f32) -> GoalProgress {
    let tol = effective_tolerance(tolerance);
    match check {
        CheckKind::GreaterOrEqual => {
            let met = current >= target - tol;
            if target > tol {
                GoalProgress::new(met, (current / target).min(1.0))
            } else if target < -tol {
                let fraction = if met { 1.0 } else { 1.0 + current / target.abs() };
                GoalProgress::new(met, fraction)
            } else {
                GoalProgress::binary(met)
            }
        }
        CheckKind::GreaterThan => {
            let met = current > target + tol;
            if target > tol {
                GoalProgress::new(met, (current / (target + tol)).min(1.0))
            } else if target < -tol {
                let fraction = if met { 1.0 } else { 1.0 + current / target.abs() };
                GoalProgress::new(met, fraction)
            } else {
                GoalProgress::binary(met)
            }
        }
        CheckKind::LessOrEqual => {
            let met = current <= target + tol;
            if met {
                GoalProgress::new(true, 1.0)
            } else {
                let overshoot = current - target;
                GoalProgress::new(false, 1.0 - overshoot / target.abs().max(tol))
            }
        }
        CheckKind::LessThan => {
            let met = current < target - tol;
            if met {
                GoalProgress::new(true, 1.0)
            } else {
                let overshoot = current - target + tol;
                GoalProgress::new(false, 1.0 - overshoot / target.abs().max(tol))
            }
        }
        CheckKind::Equals => {
            let met = (current - target).abs() <= tol;
            if target.abs() <= tol {
                let fraction = if met {
                    1.0
                } else {
                    1.0 - current.abs() / (tol * 10.0)
                };
                GoalProgress::new(met, fraction)
            } else if met {
                GoalProgress::new(true, 1.0)
            } else {
                let distance = (current - target).abs();
                GoalProgress::new(false, 1.0 - distance / target.abs())
            }
        }
        CheckKind::NotEqual => GoalProgress::binary((current - target).abs() > tol),
    }
}

/// Evaluate a range comparison over integers. Malformed ranges
/// (`upper <= lower`) degrade to binary progress.
pub fn check_range_int(
    check: RangeCheckKind,
    current: i32,
    lower: i32,
    upper: i32,
) -> GoalProgress {
    let range = (upper - lower) as f32;
    match check {
        RangeCheckKind::Between => {
            let met = current >= lower && current <= upper;
            if upper <= lower {
                return GoalProgress::binary(met);
            }
            let fraction = if current < lower {
                1.0 - (lower - current) as f32 / range
            } else if current > upper {
                1.0 - (current - upper) as f32 / range
            } else {
                1.0
            };
            GoalProgress::new(met, fraction)
        }
        RangeCheckKind::NotBetween => {
            let met = current < lower || current > upper;
            if upper <= lower {
                return GoalProgress::binary(met);
            }
            let fraction = if current < lower {
                (lower - current) as f32 / range
            } else if current > upper {
                (current - upper) as f32 / range
            } else {
                0.0
            };
            GoalProgress::new(met, fraction)
        }
    }
}

/// Evaluate a range comparison over floats with a tolerance band on the
/// bounds. Malformed ranges (`upper <= lower`) degrade to binary progress.
pub fn check_range_float(
    check: RangeCheckKind,
    current: f32,
    lower: f32,
    upper: f32,
    tolerance: f32,
) -> GoalProgress {
    let tol = effective_tolerance(tolerance);
    let range = upper - lower;
    match check {
        RangeCheckKind::Between => {
            let met = current >= lower - tol && current <= upper + tol;
            if upper <= lower {
                return GoalProgress::binary(met);
            }
            let fraction = if current < lower - tol {
                1.0 - (lower - current) / range
            } else if current > upper + tol {
                1.0 - (current - upper) / range
            } else {
                1.0
            };
            GoalProgress::new(met, fraction)
        }
        RangeCheckKind::NotBetween => {
            let met = current < lower - tol || current > upper + tol;
            if upper <= lower {
                return GoalProgress::binary(met);
            }
            let fraction = if current < lower - tol {
                (lower - current) / range
            } else if current > upper + tol {
                (current - upper) / range
            } else {
                0.0
            };
            GoalProgress::new(met, fraction)
        }
    }
}

/// Integer goal descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalInt {
    pub key: GoalKey,
    pub check: CheckKind,
    pub target: i32,
}

impl GoalInt {
    #[inline]
    pub fn progress(&self, current: i32) -> GoalProgress {
        check_int(self.check, current, self.target)
    }
}

/// Float goal descriptor. A non-positive tolerance means
/// [`DEFAULT_TOLERANCE`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalFloat {
    pub key: GoalKey,
    pub check: CheckKind,
    pub target: f32,
    #[serde(default)]
    pub tolerance: f32,
}

impl GoalFloat {
    #[inline]
    pub fn progress(&self, current: f32) -> GoalProgress {
        check_float(self.check, current, self.target, self.tolerance)
    }
}

/// Integer range goal descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRangeInt {
    pub key: GoalKey,
    pub check: RangeCheckKind,
    pub lower: i32,
    pub upper: i32,
}

impl GoalRangeInt {
    #[inline]
    pub fn progress(&self, current: i32) -> GoalProgress {
        check_range_int(self.check, current, self.lower, self.upper)
    }
}

/// Float range goal descriptor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalRangeFloat {
    pub key: GoalKey,
    pub check: RangeCheckKind,
    pub lower: f32,
    pub upper: f32,
    #[serde(default)]
    pub tolerance: f32,
}

impl GoalRangeFloat {
    #[inline]
    pub fn progress(&self, current: f32) -> GoalProgress {
        check_range_float(self.check, current, self.lower, self.upper, self.tolerance)
    }
}

/// Elapsed-time goal (e.g. "finish under 90 seconds"), compared on the float
/// path with the default tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoalTime {
    pub id: i32,
    pub check: CheckKind,
    pub target: f32,
}

impl GoalTime {
    #[inline]
    pub fn progress(&self, elapsed: f32) -> GoalProgress {
        check_float(self.check, elapsed, self.target, DEFAULT_TOLERANCE)
    }
}

/// Load-time goal table validation failures.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GoalTableError {
    #[error("int range goal {key}: upper bound {upper} must exceed lower bound {lower}")]
    MalformedIntRange {
        key: GoalKey,
        lower: i32,
        upper: i32,
    },
    #[error("float range goal {key}: upper bound {upper} must exceed lower bound {lower}")]
    MalformedFloatRange {
        key: GoalKey,
        lower: f32,
        upper: f32,
    },
    #[error("duplicate goal key {key}")]
    DuplicateKey { key: GoalKey },
}

/// Baked goal descriptors, keyed for lookup from mission definitions. Built
/// once at load time, then read-only.
#[derive(Clone, Debug, Default)]
pub struct GoalTable {
    ints: HashMap<GoalKey, GoalInt>,
    floats: HashMap<GoalKey, GoalFloat>,
    int_ranges: HashMap<GoalKey, GoalRangeInt>,
    float_ranges: HashMap<GoalKey, GoalRangeFloat>,
}

impl GoalTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_int(&mut self, goal: GoalInt) {
        self.ints.insert(goal.key, goal);
    }

    pub fn insert_float(&mut self, goal: GoalFloat) {
        self.floats.insert(goal.key, goal);
    }

    pub fn insert_int_range(&mut self, goal: GoalRangeInt) {
        self.int_ranges.insert(goal.key, goal);
    }

    pub fn insert_float_range(&mut self, goal: GoalRangeFloat) {
        self.float_ranges.insert(goal.key, goal);
    }

    pub fn is_empty(&self) -> bool {
        self.ints.is_empty()
            && self.floats.is_empty()
            && self.int_ranges.is_empty()
            && self.float_ranges.is_empty()
    }

    /// Score an integer sample against the scalar table, then the range
    /// table. None if the key is unknown on the integer side.
    pub fn progress_int(&self, key: GoalKey, current: i32) -> Option<GoalProgress> {
        if let Some(goal) = self.ints.get(&key) {
            return Some(goal.progress(current));
        }
        self.int_ranges.get(&key).map(|g| g.progress(current))
    }

    /// Score a float sample against the scalar table, then the range table.
    pub fn progress_float(&self, key: GoalKey, current: f32) -> Option<GoalProgress> {
        if let Some(goal) = self.floats.get(&key) {
            return Some(goal.progress(current));
        }
        self.float_ranges.get(&key).map(|g| g.progress(current))
    }

    /// Reject descriptors that would only ever degrade at evaluation time.
    /// Run once after baking/loading; evaluation itself never fails.
    pub fn validate(&self) -> Result<(), GoalTableError> {
        for goal in self.int_ranges.values() {
            if goal.upper <= goal.lower {
                return Err(GoalTableError::MalformedIntRange {
                    key: goal.key,
                    lower: goal.lower,
                    upper: goal.upper,
                });
            }
        }
        for goal in self.float_ranges.values() {
            if goal.upper <= goal.lower {
                return Err(GoalTableError::MalformedFloatRange {
                    key: goal.key,
                    lower: goal.lower,
                    upper: goal.upper,
                });
            }
        }
        Ok(())
    }
}
