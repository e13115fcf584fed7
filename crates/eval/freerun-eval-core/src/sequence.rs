//! Sequenced ease/transform blending.
//!
//! A [`SequencePlan`] is an arena of [`EaseLink`] records baked once from
//! static data; each link names its easing selector (channel view), the index
//! of the link that follows it, and a duration. The `next` indices form a
//! directed graph that may cycle — including self-loops — and there is no
//! terminal state inherent to the graph; a caller that wants termination
//! bakes a sentinel link that points to itself.
//!
//! One [`Cursor`] per animated entity walks the plan. Per tick the cursor's
//! elapsed time advances, the active link's channel is interpolated between
//! the start/end lookup tables, and on completion the cursor moves to
//! `link.next` with elapsed time reset to zero.
//!
//! All index lookups are bounds-checked: baked-data corruption or a stale
//! cursor yields [`SequenceError::IndexOutOfRange`] for that entity instead
//! of reading out of bounds. Callers treat the error as fatal to the entity's
//! blend, not to the batch.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use freerun_api_core::TransformRecord;

use crate::ease::{Channel, Ease};
use crate::math::{lerp_f32, lerp_vec3, quat_rotate_x, quat_rotate_y, quat_rotate_z};

/// One node of the blend graph: which curve drives the link, where the
/// cursor goes next, and how long the link lasts.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EaseLink {
    pub ease: Ease,
    pub next: u8,
    pub duration: f32,
}

/// Per-entity position within a plan.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub current: u8,
    pub elapsed: f32,
}

impl Cursor {
    pub fn at(link: u8) -> Self {
        Self {
            current: link,
            elapsed: 0.0,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    #[error("link index {index} out of range (plan has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The interpolated value produced for the active channel this tick.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BlendSample {
    PositionX(f32),
    PositionY(f32),
    PositionZ(f32),
    Position([f32; 3]),
    /// Rotation angles are radians around the named axis.
    RotationX(f32),
    RotationY(f32),
    RotationZ(f32),
    Scale(f32),
}

impl BlendSample {
    /// Write this sample into a transform record. Axis rotations replace the
    /// whole rotation with a single-axis quaternion, matching the source
    /// runtime's behavior.
    pub fn apply_to(&self, transform: &mut TransformRecord) {
        match *self {
            BlendSample::PositionX(x) => transform.pos[0] = x,
            BlendSample::PositionY(y) => transform.pos[1] = y,
            BlendSample::PositionZ(z) => transform.pos[2] = z,
            BlendSample::Position(pos) => transform.pos = pos,
            BlendSample::RotationX(a) => transform.rot = quat_rotate_x(a),
            BlendSample::RotationY(a) => transform.rot = quat_rotate_y(a),
            BlendSample::RotationZ(a) => transform.rot = quat_rotate_z(a),
            BlendSample::Scale(s) => transform.scale = [s, s, s],
        }
    }
}

/// Result of one tick of the blender for one entity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub sample: BlendSample,
    /// Set when the active link completed this tick; carries the index the
    /// cursor advanced to.
    pub advanced_to: Option<u8>,
}

/// Immutable baked blend graph plus the per-channel start/end lookup tables,
/// indexed by link index. Only constructible through [`SequencePlan::new`],
/// which validates the link graph.
#[derive(Clone, Debug, Default)]
pub struct SequencePlan {
    links: Vec<EaseLink>,
    positions: Vec<[f32; 3]>,
    /// Radians for the rotation channels.
    rotations: Vec<f32>,
    scales: Vec<f32>,
}

impl SequencePlan {
    /// Build a plan, rejecting link graphs whose `next` indices point
    /// outside the arena. Channel lookup tables are allowed to be shorter
    /// than the arena (a plan that never uses the scale channel needs no
    /// scale table); those lookups are checked per tick instead.
    pub fn new(
        links: Vec<EaseLink>,
        positions: Vec<[f32; 3]>,
        rotations: Vec<f32>,
        scales: Vec<f32>,
    ) -> Result<Self, SequenceError> {
        let len = links.len();
        for link in &links {
            if link.next as usize >= len {
                return Err(SequenceError::IndexOutOfRange {
                    index: link.next as usize,
                    len,
                });
            }
        }
        Ok(Self {
            links,
            positions,
            rotations,
            scales,
        })
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn link(&self, index: usize) -> Option<&EaseLink> {
        self.links.get(index)
    }

    fn position(&self, index: usize) -> Result<[f32; 3], SequenceError> {
        self.positions
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.positions.len(),
            })
    }

    fn rotation(&self, index: usize) -> Result<f32, SequenceError> {
        self.rotations
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.rotations.len(),
            })
    }

    fn scale(&self, index: usize) -> Result<f32, SequenceError> {
        self.scales
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.scales.len(),
            })
    }

    /// Advance a cursor by `dt` and interpolate the active link's channel.
    ///
    /// Completion uses `elapsed >= duration`, so a cadence whose step divides
    /// the duration transitions exactly on the boundary tick: that tick still
    /// samples the outgoing link at its end value, and the next tick starts
    /// the destination link from zero.
    pub fn step(&self, cursor: &mut Cursor, dt: f32) -> Result<StepOutcome, SequenceError> {
        let index = cursor.current as usize;
        let link = self
            .links
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.links.len(),
            })?;

        cursor.elapsed += dt;
        let (_, eased) = link.ease.try_evaluate(cursor.elapsed, link.duration, 0.0);
        let next = link.next as usize;

        let sample = match link.ease.channel() {
            Channel::PositionX => BlendSample::PositionX(lerp_f32(
                self.position(index)?[0],
                self.position(next)?[0],
                eased,
            )),
            Channel::PositionY => BlendSample::PositionY(lerp_f32(
                self.position(index)?[1],
                self.position(next)?[1],
                eased,
            )),
            Channel::PositionZ => BlendSample::PositionZ(lerp_f32(
                self.position(index)?[2],
                self.position(next)?[2],
                eased,
            )),
            Channel::Position => BlendSample::Position(lerp_vec3(
                self.position(index)?,
                self.position(next)?,
                eased,
            )),
            Channel::RotationX => BlendSample::RotationX(lerp_f32(
                self.rotation(index)?,
                self.rotation(next)?,
                eased,
            )),
            Channel::RotationY => BlendSample::RotationY(lerp_f32(
                self.rotation(index)?,
                self.rotation(next)?,
                eased,
            )),
            Channel::RotationZ => BlendSample::RotationZ(lerp_f32(
                self.rotation(index)?,
                self.rotation(next)?,
                eased,
            )),
            Channel::Scale => {
                BlendSample::Scale(lerp_f32(self.scale(index)?, self.scale(next)?, eased))
            }
        };

        let advanced_to = if cursor.elapsed >= link.duration {
            cursor.current = link.next;
            cursor.elapsed = 0.0;
            Some(link.next)
        } else {
            None
        };

        Ok(StepOutcome {
            sample,
            advanced_to,
        })
    }

    /// Step and write the sample into a transform record in one call.
    pub fn step_transform(
        &self,
        cursor: &mut Cursor,
        dt: f32,
        transform: &mut TransformRecord,
    ) -> Result<StepOutcome, SequenceError> {
        let outcome = self.step(cursor, dt)?;
        outcome.sample.apply_to(transform);
        Ok(outcome)
    }
}
