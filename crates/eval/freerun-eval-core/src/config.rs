//! Core configuration for freerun-eval-core.

use serde::{Deserialize, Serialize};

/// Configuration for engine sizing and output policy. Kept small; expand as
/// needed without breaking the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Initial capacity hint for the per-entity state table.
    pub entity_capacity: usize,

    /// Maximum events retained per tick; events beyond the cap are dropped
    /// (changes are never dropped).
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entity_capacity: 256,
            max_events_per_tick: 1024,
        }
    }
}
