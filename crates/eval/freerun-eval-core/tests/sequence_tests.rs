use std::f32::consts::{FRAC_PI_2, PI};

use freerun_eval_core::{
    BlendSample, Channel, Cursor, Ease, EaseFamily, EaseLink, SequenceError, SequencePlan,
    TransformRecord,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn link(family: EaseFamily, channel: Channel, next: u8, duration: f32) -> EaseLink {
    EaseLink {
        ease: Ease::with_channel(family, channel),
        next,
        duration,
    }
}

/// Two linear links in a cycle: X position out, Y position back.
fn two_link_plan() -> SequencePlan {
    SequencePlan::new(
        vec![
            link(EaseFamily::Linear, Channel::PositionX, 1, 1.0),
            link(EaseFamily::Linear, Channel::PositionY, 0, 1.0),
        ],
        vec![[0.0, 0.0, 0.0], [2.0, 4.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap()
}

/// it should walk a 2-link cycle at a 0.5s cadence, transitioning exactly on
/// the boundary tick and alternating the active channel
#[test]
fn two_link_cycle_cadence() {
    let plan = two_link_plan();
    let mut cursor = Cursor::default();

    // First link: X from 0 to 2.
    let out = plan.step(&mut cursor, 0.5).unwrap();
    assert_eq!(out.sample, BlendSample::PositionX(1.0));
    assert_eq!(out.advanced_to, None);

    // Boundary tick samples the end value and advances.
    let out = plan.step(&mut cursor, 0.5).unwrap();
    assert_eq!(out.sample, BlendSample::PositionX(2.0));
    assert_eq!(out.advanced_to, Some(1));
    assert_eq!(cursor, Cursor::at(1));

    // Second link: Y from 4 back to 0, starting from zero elapsed.
    let out = plan.step(&mut cursor, 0.5).unwrap();
    assert_eq!(out.sample, BlendSample::PositionY(2.0));
    assert_eq!(out.advanced_to, None);

    let out = plan.step(&mut cursor, 0.5).unwrap();
    assert_eq!(out.sample, BlendSample::PositionY(0.0));
    assert_eq!(out.advanced_to, Some(0));

    // And around again.
    let out = plan.step(&mut cursor, 0.5).unwrap();
    assert_eq!(out.sample, BlendSample::PositionX(1.0));
}

/// it should hold a self-loop sentinel link forever
#[test]
fn self_loop_sentinel() {
    let plan = SequencePlan::new(
        vec![link(EaseFamily::Linear, Channel::PositionX, 0, 1.0)],
        vec![[3.0, 0.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();

    for _ in 0..5 {
        let out = plan.step(&mut cursor, 1.0).unwrap();
        // Start and end are the same entry, so the sample is pinned.
        assert_eq!(out.sample, BlendSample::PositionX(3.0));
        assert_eq!(out.advanced_to, Some(0));
        assert_eq!(cursor.current, 0);
    }
}

/// it should reject link graphs pointing outside the arena at build time
#[test]
fn construction_rejects_bad_next_index() {
    let err = SequencePlan::new(
        vec![link(EaseFamily::Linear, Channel::PositionX, 5, 1.0)],
        vec![[0.0; 3]],
        vec![],
        vec![],
    )
    .unwrap_err();
    assert_eq!(err, SequenceError::IndexOutOfRange { index: 5, len: 1 });
}

/// it should fail a stale cursor with a checked error instead of reading out
/// of bounds
#[test]
fn stale_cursor_is_checked() {
    let plan = two_link_plan();
    let mut cursor = Cursor::at(7);
    let err = plan.step(&mut cursor, 0.1).unwrap_err();
    assert_eq!(err, SequenceError::IndexOutOfRange { index: 7, len: 2 });
    // The cursor is left untouched for diagnosis.
    assert_eq!(cursor.current, 7);
}

/// it should bounds-check the channel lookup tables per tick
#[test]
fn missing_channel_table_is_checked() {
    let plan = SequencePlan::new(
        vec![link(EaseFamily::Linear, Channel::RotationY, 0, 1.0)],
        vec![[0.0; 3]],
        vec![], // no rotation table baked
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let err = plan.step(&mut cursor, 0.1).unwrap_err();
    assert_eq!(err, SequenceError::IndexOutOfRange { index: 0, len: 0 });
}

/// it should ease non-linear families before interpolating the channel
#[test]
fn eased_channel_interpolation() {
    let plan = SequencePlan::new(
        vec![
            link(EaseFamily::InQuad, Channel::PositionX, 1, 1.0),
            link(EaseFamily::Linear, Channel::PositionX, 0, 1.0),
        ],
        vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let out = plan.step(&mut cursor, 0.5).unwrap();
    // InQuad(0.5) = 0.25 over the 0..2 span.
    assert_eq!(out.sample, BlendSample::PositionX(0.5));
}

/// it should write axis rotations as single-axis quaternions
#[test]
fn rotation_channel_writes_quaternion() {
    let plan = SequencePlan::new(
        vec![
            link(EaseFamily::Linear, Channel::RotationY, 1, 1.0),
            link(EaseFamily::Linear, Channel::RotationY, 0, 1.0),
        ],
        vec![],
        vec![0.0, PI],
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let mut transform = TransformRecord::default();

    let out = plan
        .step_transform(&mut cursor, 0.5, &mut transform)
        .unwrap();
    assert_eq!(out.sample, BlendSample::RotationY(FRAC_PI_2));
    approx(transform.rot[1], (FRAC_PI_2 * 0.5).sin(), 1e-6);
    approx(transform.rot[3], (FRAC_PI_2 * 0.5).cos(), 1e-6);
    approx(transform.rot[0], 0.0, 0.0);
}

/// it should blend uniform scale into all three components
#[test]
fn scale_channel_uniform() {
    let plan = SequencePlan::new(
        vec![
            link(EaseFamily::Linear, Channel::Scale, 1, 1.0),
            link(EaseFamily::Linear, Channel::Scale, 0, 1.0),
        ],
        vec![],
        vec![],
        vec![1.0, 3.0],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let mut transform = TransformRecord::default();

    plan.step_transform(&mut cursor, 0.5, &mut transform)
        .unwrap();
    assert_eq!(transform.scale, [2.0, 2.0, 2.0]);
}

/// it should blend the full position channel as a vector
#[test]
fn full_position_channel() {
    let plan = SequencePlan::new(
        vec![
            link(EaseFamily::Linear, Channel::Position, 1, 2.0),
            link(EaseFamily::Linear, Channel::Position, 0, 2.0),
        ],
        vec![[0.0, 0.0, 0.0], [2.0, 4.0, -6.0]],
        vec![],
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let out = plan.step(&mut cursor, 1.0).unwrap();
    assert_eq!(out.sample, BlendSample::Position([1.0, 2.0, -3.0]));
    assert_eq!(out.advanced_to, None);
}

/// it should finish zero-duration links immediately at their end value
#[test]
fn zero_duration_link() {
    let plan = SequencePlan::new(
        vec![
            link(EaseFamily::Linear, Channel::PositionX, 1, 0.0),
            link(EaseFamily::Linear, Channel::PositionX, 0, 1.0),
        ],
        vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
        vec![],
        vec![],
    )
    .unwrap();
    let mut cursor = Cursor::default();
    let out = plan.step(&mut cursor, 0.25).unwrap();
    assert_eq!(out.sample, BlendSample::PositionX(2.0));
    assert_eq!(out.advanced_to, Some(1));
}

/// it should keep an overshooting tick clamped at the end value
#[test]
fn overshoot_clamps_to_end() {
    let plan = two_link_plan();
    let mut cursor = Cursor::default();
    let out = plan.step(&mut cursor, 1.75).unwrap();
    assert_eq!(out.sample, BlendSample::PositionX(2.0));
    assert_eq!(out.advanced_to, Some(1));
    // Elapsed resets on transition rather than carrying the overshoot.
    approx(cursor.elapsed, 0.0, 0.0);
}
