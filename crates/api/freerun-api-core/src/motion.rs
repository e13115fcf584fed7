//! Discrete motion states and the animation result record.

use serde::{Deserialize, Serialize};

/// Discrete character motion state, owned and transitioned by the gameplay
/// state machine outside this core. The resolver only reads it.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotionState {
    #[default]
    Uninitialized = 0,
    GroundMove = 1,
    Crouched = 2,
    AirMove = 3,
    WallRun = 4,
    Rolling = 5,
    LedgeGrab = 6,
    LedgeStandingUp = 7,
    Dashing = 8,
    Swimming = 9,
    Climbing = 10,
    FlyingNoCollisions = 11,
    RopeSwing = 12,
    Sliding = 13,
}

/// Identifier of an animation clip to play. An enum rather than an asset
/// reference; adapters map these onto whatever their animator understands.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ClipId {
    #[default]
    Idle = 0,
    Run = 1,
    Sprint = 2,
    InAir = 3,
    LedgeGrabMove = 4,
    LedgeStandUp = 5,
    WallRunLeft = 6,
    WallRunRight = 7,
    CrouchIdle = 8,
    CrouchMove = 9,
    ClimbingMove = 10,
    SwimmingIdle = 11,
    SwimmingMove = 12,
    Dash = 13,
    RopeHang = 14,
    Sliding = 15,
}

/// Result of resolving a motion state against kinematic inputs: which clip to
/// play and at what playback-speed ratio. Produced fresh every tick, never
/// retained.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationOutput {
    pub clip: ClipId,
    pub speed: f32,
}

impl AnimationOutput {
    /// A clip played at its authored rate.
    #[inline]
    pub fn at_unit_speed(clip: ClipId) -> Self {
        Self { clip, speed: 1.0 }
    }
}
