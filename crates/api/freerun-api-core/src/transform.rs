//! Transform record written by the sequenced blender.

use serde::{Deserialize, Serialize};

/// Plain TRS record (rotation is a quaternion, x/y/z/w). The blender writes
/// one channel of this per tick; adapters apply it to their own transform
/// representation.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformRecord {
    pub pos: [f32; 3],
    pub rot: [f32; 4],
    pub scale: [f32; 3],
}

impl TransformRecord {
    pub const IDENTITY: Self = Self {
        pos: [0.0, 0.0, 0.0],
        rot: [0.0, 0.0, 0.0, 1.0],
        scale: [1.0, 1.0, 1.0],
    };
}

impl Default for TransformRecord {
    fn default() -> Self {
        Self::IDENTITY
    }
}
