//! Loader for the canonical JSON form of the baked tables.
//!
//! The authoring/baking pipeline that produces these documents is outside
//! this core; we only consume the flattened arrays. Parsing goes through raw
//! serde schema structs, then conversion and validation, so a document that
//! parses but describes a broken graph or a malformed goal range is rejected
//! here rather than degrading at tick time.

use serde::Deserialize;
use thiserror::Error;

use freerun_api_core::GoalKey;

use crate::goals::{GoalFloat, GoalInt, GoalRangeFloat, GoalRangeInt, GoalTable, GoalTableError};
use crate::resolver::MaxSpeeds;
use crate::sequence::{EaseLink, SequenceError, SequencePlan};

/// Errors produced while parsing or validating a baked-tables document.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("tables json parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Goal(#[from] GoalTableError),
    #[error("plan {index}: {source}")]
    Plan {
        index: usize,
        source: SequenceError,
    },
}

/// Parsed and validated baked tables, ready to install into an engine.
#[derive(Debug, Default)]
pub struct StoredTables {
    pub speeds: MaxSpeeds,
    pub goals: GoalTable,
    pub plans: Vec<SequencePlan>,
}

/// Parse a baked-tables JSON document.
///
/// ```
/// let doc = r#"{
///   "maxSpeeds": { "groundSprint": 9.0, "groundRun": 6.0, "crouched": 2.5,
///                  "climbing": 3.0, "ledgeMove": 1.5, "swimming": 4.0 },
///   "goals": { "ints": [ { "key": 1, "check": "GreaterOrEqual", "target": 10 } ] },
///   "plans": [ { "links": [ { "ease": 0, "next": 0, "duration": 1.0 } ],
///               "positions": [ [0.0, 0.0, 0.0] ] } ]
/// }"#;
/// let tables = freerun_eval_core::parse_stored_tables_json(doc).unwrap();
/// assert_eq!(tables.plans.len(), 1);
/// ```
pub fn parse_stored_tables_json(s: &str) -> Result<StoredTables, TableError> {
    let raw: RawTables = serde_json::from_str(s).map_err(|e| TableError::Parse(e.to_string()))?;

    let speeds = raw.max_speeds;
    if speeds.ground_sprint <= 0.0 || speeds.ground_run <= 0.0 || speeds.crouched <= 0.0 {
        // The resolver divides by these unguarded; baked data is expected to
        // keep them positive.
        log::warn!("baked max-speed table carries non-positive ground speeds");
    }

    let goals = build_goal_table(raw.goals)?;

    let mut plans = Vec::with_capacity(raw.plans.len());
    for (index, plan) in raw.plans.into_iter().enumerate() {
        let plan = SequencePlan::new(plan.links, plan.positions, plan.rotations, plan.scales)
            .map_err(|source| TableError::Plan { index, source })?;
        plans.push(plan);
    }

    Ok(StoredTables {
        speeds,
        goals,
        plans,
    })
}

fn build_goal_table(raw: RawGoals) -> Result<GoalTable, TableError> {
    let mut table = GoalTable::new();

    // Scalar and range goals of the same numeric domain share a key space
    // (lookup falls through from scalar to range), so duplicates across the
    // two arrays are ambiguous and rejected.
    let mut int_keys: hashbrown::HashSet<GoalKey> = hashbrown::HashSet::new();
    for goal in raw.ints {
        if !int_keys.insert(goal.key) {
            return Err(GoalTableError::DuplicateKey { key: goal.key }.into());
        }
        table.insert_int(goal);
    }
    for goal in raw.int_ranges {
        if !int_keys.insert(goal.key) {
            return Err(GoalTableError::DuplicateKey { key: goal.key }.into());
        }
        table.insert_int_range(goal);
    }

    let mut float_keys: hashbrown::HashSet<GoalKey> = hashbrown::HashSet::new();
    for goal in raw.floats {
        if !float_keys.insert(goal.key) {
            return Err(GoalTableError::DuplicateKey { key: goal.key }.into());
        }
        table.insert_float(goal);
    }
    for goal in raw.float_ranges {
        if !float_keys.insert(goal.key) {
            return Err(GoalTableError::DuplicateKey { key: goal.key }.into());
        }
        table.insert_float_range(goal);
    }

    table.validate()?;
    Ok(table)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawTables {
    #[serde(rename = "maxSpeeds", default)]
    max_speeds: MaxSpeeds,
    #[serde(default)]
    goals: RawGoals,
    #[serde(default)]
    plans: Vec<RawPlan>,
}

#[derive(Debug, Default, Deserialize)]
struct RawGoals {
    #[serde(default)]
    ints: Vec<GoalInt>,
    #[serde(default)]
    floats: Vec<GoalFloat>,
    #[serde(rename = "intRanges", default)]
    int_ranges: Vec<GoalRangeInt>,
    #[serde(rename = "floatRanges", default)]
    float_ranges: Vec<GoalRangeFloat>,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    links: Vec<EaseLink>,
    #[serde(default)]
    positions: Vec<[f32; 3]>,
    #[serde(default)]
    rotations: Vec<f32>,
    #[serde(default)]
    scales: Vec<f32>,
}
