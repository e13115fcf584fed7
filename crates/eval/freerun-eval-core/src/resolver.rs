//! Motion-state → animation resolution.
//!
//! Pure per-state dispatch from the character's discrete motion state and
//! this tick's kinematics onto a clip id and playback-speed ratio. No state
//! is mutated; the only output is the returned record.

use serde::{Deserialize, Serialize};

use freerun_api_core::{AnimationOutput, ClipId, MotionState};

use crate::inputs::Kinematics;
use crate::math::{dot3, quat_rotate_vec3};

/// Squared move-vector magnitude below which a character counts as
/// stationary.
const STATIONARY_SQ: f32 = 1e-4;

/// Swimming velocity ratio below which the idle clip is selected.
const SWIM_IDLE_RATIO: f32 = 0.1;

/// Named per-state maximum speeds, baked once from authoring data.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxSpeeds {
    pub ground_sprint: f32,
    pub ground_run: f32,
    pub crouched: f32,
    pub climbing: f32,
    pub ledge_move: f32,
    pub swimming: f32,
}

impl Default for MaxSpeeds {
    fn default() -> Self {
        Self {
            ground_sprint: 9.0,
            ground_run: 6.0,
            crouched: 2.5,
            climbing: 3.0,
            ledge_move: 1.5,
            swimming: 4.0,
        }
    }
}

/// Current and previous motion state. The owning gameplay state machine
/// drives transitions; this core only reads the pair.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub previous: MotionState,
    pub current: MotionState,
}

impl CharacterState {
    pub fn new(current: MotionState) -> Self {
        Self {
            previous: MotionState::Uninitialized,
            current,
        }
    }

    /// Record a transition, keeping the outgoing state as `previous`.
    #[inline]
    pub fn transition_to(&mut self, next: MotionState) {
        self.previous = self.current;
        self.current = next;
    }

    /// True on the first tick after a transition.
    #[inline]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }

    /// Resolve this state against the tick's kinematics into a clip and
    /// playback speed.
    pub fn animation_output(&self, kin: &Kinematics, speeds: &MaxSpeeds) -> AnimationOutput {
        match self.current {
            MotionState::GroundMove => {
                if move_len_sq(kin.move_vector) < STATIONARY_SQ {
                    AnimationOutput::at_unit_speed(ClipId::Idle)
                } else if kin.is_sprinting {
                    AnimationOutput {
                        clip: ClipId::Sprint,
                        speed: kin.velocity_magnitude / speeds.ground_sprint,
                    }
                } else {
                    AnimationOutput {
                        clip: ClipId::Run,
                        speed: kin.velocity_magnitude / speeds.ground_run,
                    }
                }
            }
            MotionState::Crouched => {
                if move_len_sq(kin.move_vector) < STATIONARY_SQ {
                    AnimationOutput::at_unit_speed(ClipId::CrouchIdle)
                } else {
                    AnimationOutput {
                        clip: ClipId::CrouchMove,
                        speed: kin.velocity_magnitude / speeds.crouched,
                    }
                }
            }
            MotionState::AirMove => AnimationOutput::at_unit_speed(ClipId::InAir),
            MotionState::Dashing => AnimationOutput::at_unit_speed(ClipId::Dash),
            MotionState::WallRun => {
                let right = quat_rotate_vec3(kin.rotation, [1.0, 0.0, 0.0]);
                let wall_on_left = dot3(right, kin.wall_normal) > 0.0;
                AnimationOutput::at_unit_speed(if wall_on_left {
                    ClipId::WallRunLeft
                } else {
                    ClipId::WallRunRight
                })
            }
            MotionState::RopeSwing => AnimationOutput::at_unit_speed(ClipId::RopeHang),
            MotionState::Climbing => AnimationOutput {
                clip: ClipId::ClimbingMove,
                speed: guarded_ratio(kin.velocity_magnitude, speeds.climbing),
            },
            MotionState::LedgeGrab => AnimationOutput {
                clip: ClipId::LedgeGrabMove,
                speed: guarded_ratio(kin.velocity_magnitude, speeds.ledge_move),
            },
            MotionState::LedgeStandingUp => AnimationOutput::at_unit_speed(ClipId::LedgeStandUp),
            MotionState::Swimming => {
                let ratio = guarded_ratio(kin.velocity_magnitude, speeds.swimming);
                if ratio < SWIM_IDLE_RATIO {
                    AnimationOutput::at_unit_speed(ClipId::SwimmingIdle)
                } else {
                    AnimationOutput {
                        clip: ClipId::SwimmingMove,
                        speed: ratio,
                    }
                }
            }
            MotionState::Sliding => AnimationOutput::at_unit_speed(ClipId::Sliding),
            // Unknown or animation-less states fall back to Idle at unit
            // speed; this default is intentional, not an error path.
            MotionState::Rolling | MotionState::FlyingNoCollisions | MotionState::Uninitialized => {
                AnimationOutput::at_unit_speed(ClipId::Idle)
            }
        }
    }
}

#[inline]
fn move_len_sq(v: [f32; 2]) -> f32 {
    v[0] * v[0] + v[1] * v[1]
}

/// Velocity ratio guarded against non-positive max speeds (speed 0, never
/// NaN/Inf).
#[inline]
fn guarded_ratio(velocity: f32, max_speed: f32) -> f32 {
    if max_speed > 0.0 {
        velocity / max_speed
    } else {
        0.0
    }
}
